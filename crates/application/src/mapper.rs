//! Translation between persistence models, domain entities, and transfer objects.
//!
//! Every type a mapper handles declares the representation families it belongs
//! to through [`Representation::KIND`]. [`MapperExt::map`] looks at the family
//! of the source value and of the requested target type and picks one of the
//! four directional conversions:
//!
//! | source      | target                                   | conversion  |
//! |-------------|------------------------------------------|-------------|
//! | persistence | domain                                   | `to_domain` |
//! | domain      | persistence                              | `to_db`     |
//! | domain      | transfer, and neither persistence nor domain | `to_dto` |
//! | transfer, and neither persistence nor domain | domain  | `from_dto`  |
//!
//! Rules are tried in that order and the first match wins. Anything else is an
//! [`UnsupportedMapping`]. A type declaring several families (for example a
//! transfer object that is also a persistence model) is excluded from the
//! transfer rules and falls through to [`UnsupportedMapping`].

use domain::Entity;

use crate::error::UnsupportedMapping;
use crate::short_type_name;

/// Set of representation families a type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepresentationKind {
    bits: u8,
}

impl RepresentationKind {
    /// Storage-shaped record, e.g. a database row.
    pub const PERSISTENCE: Self = Self { bits: 0b001 };
    /// Domain entity carrying identity and behavior.
    pub const DOMAIN: Self = Self { bits: 0b010 };
    /// Boundary-shaped object, e.g. an API payload.
    pub const TRANSFER: Self = Self { bits: 0b100 };

    /// Combines two kinds into one that belongs to both families.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub const fn is_persistence(self) -> bool {
        self.bits & Self::PERSISTENCE.bits != 0
    }

    pub const fn is_domain(self) -> bool {
        self.bits & Self::DOMAIN.bits != 0
    }

    pub const fn is_transfer(self) -> bool {
        self.bits & Self::TRANSFER.bits != 0
    }

    /// Transfer-only: a transfer object that is not also a persistence model or entity.
    pub const fn is_plain_transfer(self) -> bool {
        self.is_transfer() && !self.is_persistence() && !self.is_domain()
    }
}

/// Declares which representation families a type belongs to.
pub trait Representation: 'static {
    const KIND: RepresentationKind;
}

/// The type a caller wants [`MapperExt::map`] to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetType {
    name: &'static str,
    kind: RepresentationKind,
}

impl TargetType {
    pub fn of<T: Representation>() -> Self {
        Self {
            name: short_type_name::<T>(),
            kind: T::KIND,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> RepresentationKind {
        self.kind
    }
}

/// A borrowed value handed to [`MapperExt::map`], tagged with the mapper slot it fills.
#[derive(Debug)]
pub enum MapSource<'a, P, E, T> {
    Persistence(&'a P),
    Domain(&'a E),
    Transfer(&'a T),
}

impl<P, E, T> Clone for MapSource<'_, P, E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, E, T> Copy for MapSource<'_, P, E, T> {}

impl<P, E, T> MapSource<'_, P, E, T>
where
    P: Representation,
    E: Representation,
    T: Representation,
{
    /// Representation families of the value's own type.
    pub fn kind(&self) -> RepresentationKind {
        match self {
            MapSource::Persistence(_) => P::KIND,
            MapSource::Domain(_) => E::KIND,
            MapSource::Transfer(_) => T::KIND,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            MapSource::Persistence(_) => short_type_name::<P>(),
            MapSource::Domain(_) => short_type_name::<E>(),
            MapSource::Transfer(_) => short_type_name::<T>(),
        }
    }
}

/// The value produced by [`MapperExt::map`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped<P, E, T> {
    Persistence(P),
    Domain(E),
    Transfer(T),
}

impl<P, E, T> Mapped<P, E, T> {
    pub fn into_persistence(self) -> Option<P> {
        match self {
            Mapped::Persistence(model) => Some(model),
            _ => None,
        }
    }

    pub fn into_domain(self) -> Option<E> {
        match self {
            Mapped::Domain(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn into_transfer(self) -> Option<T> {
        match self {
            Mapped::Transfer(dto) => Some(dto),
            _ => None,
        }
    }

    /// Borrows the value as a source for a further mapping.
    pub fn as_source(&self) -> MapSource<'_, P, E, T> {
        match self {
            Mapped::Persistence(model) => MapSource::Persistence(model),
            Mapped::Domain(entity) => MapSource::Domain(entity),
            Mapped::Transfer(dto) => MapSource::Transfer(dto),
        }
    }
}

/// Field-by-field conversions for one entity type.
///
/// Concrete mappers implement the five directional conversions; the generic
/// [`map`](MapperExt::map) dispatcher comes from [`MapperExt`].
pub trait Mapper: Send + Sync {
    /// Persistence model, e.g. a database row.
    type Model: Representation;

    /// Domain entity.
    type Entity: Representation + Entity;

    /// Transfer object, e.g. an API payload.
    type Dto: Representation;

    /// Conversion failure. Must be able to carry an [`UnsupportedMapping`].
    type Error: From<UnsupportedMapping>;

    fn to_domain(&self, model: &Self::Model) -> Result<Self::Entity, Self::Error>;

    /// Builds a new persistence model from an entity.
    fn to_db(&self, entity: &Self::Entity) -> Result<Self::Model, Self::Error>;

    /// Copies entity state into an existing persistence model.
    ///
    /// Unlike [`to_db`](Mapper::to_db), this keeps persistence-only fields
    /// such as surrogate keys or row versions intact.
    fn to_db_update<'m>(
        &self,
        entity: &Self::Entity,
        model: &'m mut Self::Model,
    ) -> Result<&'m mut Self::Model, Self::Error>;

    fn to_dto(&self, entity: &Self::Entity) -> Result<Self::Dto, Self::Error>;

    fn from_dto(&self, dto: &Self::Dto) -> Result<Self::Entity, Self::Error>;
}

/// The generic dispatcher over a [`Mapper`]'s directional conversions.
///
/// Implemented for every mapper; it cannot be overridden per mapper.
pub trait MapperExt: Mapper {
    /// Converts `source` into `target`, choosing the direction from their
    /// representation families. Errors from the concrete conversion are
    /// returned unchanged.
    #[allow(clippy::type_complexity)]
    fn map(
        &self,
        source: MapSource<'_, Self::Model, Self::Entity, Self::Dto>,
        target: TargetType,
    ) -> Result<Mapped<Self::Model, Self::Entity, Self::Dto>, Self::Error> {
        let source_kind = source.kind();
        let target_kind = target.kind();

        let mapped = match source {
            MapSource::Persistence(model)
                if source_kind.is_persistence() && target_kind.is_domain() =>
            {
                tracing::debug!(target_type = target.name(), "mapping to_domain");
                Mapped::Domain(self.to_domain(model)?)
            }
            MapSource::Domain(entity) if source_kind.is_domain() && target_kind.is_persistence() => {
                tracing::debug!(target_type = target.name(), "mapping to_db");
                Mapped::Persistence(self.to_db(entity)?)
            }
            MapSource::Domain(entity)
                if source_kind.is_domain() && target_kind.is_plain_transfer() =>
            {
                tracing::debug!(target_type = target.name(), "mapping to_dto");
                Mapped::Transfer(self.to_dto(entity)?)
            }
            MapSource::Transfer(dto)
                if source_kind.is_plain_transfer() && target_kind.is_domain() =>
            {
                tracing::debug!(target_type = target.name(), "mapping from_dto");
                Mapped::Domain(self.from_dto(dto)?)
            }
            _ => {
                let source_type = source.type_name();
                metrics::counter!("mapper_unsupported_total").increment(1);
                tracing::debug!(source_type, target_type = target.name(), "unsupported mapping");
                return Err(UnsupportedMapping {
                    source_type,
                    target_type: target.name(),
                }
                .into());
            }
        };

        Ok(mapped)
    }
}

impl<M: Mapper + ?Sized> MapperExt for M {}
