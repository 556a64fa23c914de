//! Resource and data source traits

use crate::data::ResourceData;
use crate::error::Result;
use crate::schema::Schema;
use async_trait::async_trait;

/// A managed object with a create/read/delete lifecycle
///
/// There is no update: every input attribute forces replacement.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name, e.g. "cloudability_linked_account"
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Create the object and populate computed attributes
    async fn create(&self, data: &mut ResourceData) -> Result<()>;

    /// Refresh attributes; clears the id when the object is gone
    async fn read(&self, data: &mut ResourceData) -> Result<()>;

    async fn delete(&self, data: &mut ResourceData) -> Result<()>;

    /// Adopt an existing object by its import id
    async fn import(&self, import_id: &str) -> Result<ResourceData>;
}

/// A read-only lookup
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    async fn read(&self, data: &mut ResourceData) -> Result<()>;
}
