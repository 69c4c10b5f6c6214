//! Common repository traits
//!
//! This module defines generic interfaces for database operations.

use super::StoreError;

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the database)
/// * `CreateDTO` - DTO for creation (without ID, will be automatically generated)
pub trait Create<Entity, CreateDTO> {
    /// Validates and inserts a new entity
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the database
    /// * `Err(StoreError::Validation)` - A field constraint or a reference failed
    async fn create(&self, data: &CreateDTO) -> Result<Entity, StoreError>;
}

/// Trait for reading a single entity by primary key
pub trait Read<Entity, Id> {
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    async fn read(&self, id: &Id) -> Result<Option<Entity>, StoreError>;
}

/// Trait for listing every row of a table
pub trait ReadAll<Entity> {
    /// Entities are returned in insertion order (ascending primary key).
    async fn read_all(&self) -> Result<Vec<Entity>, StoreError>;
}

/// Trait for updating existing entities
///
/// # Type Parameters
/// * `Entity` - Type of the updated entity
/// * `UpdateDTO` - DTO for updating (optional fields for partial updates)
/// * `Id` - Type of the primary key
pub trait Update<Entity, UpdateDTO, Id> {
    /// Applies the `Some(_)` fields of `data` to the stored row, validates the
    /// merged record and writes it
    ///
    /// # Returns
    /// * `Ok(Entity)` - Updated entity
    /// * `Err(StoreError::NotFound)` - No entity with that ID
    /// * `Err(StoreError::Validation)` - The merged record is invalid
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, StoreError>;
}

/// Trait for deleting entities
pub trait Delete<Id> {
    /// Deletes an entity and, through the foreign keys, everything depending on it
    ///
    /// # Returns
    /// * `Ok(())` - Deletion successful
    /// * `Err(StoreError::NotFound)` - No entity with that ID
    async fn delete(&self, id: &Id) -> Result<(), StoreError>;
}
