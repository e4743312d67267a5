pub mod metadata;
pub mod order;
pub mod request;
pub mod validation;

pub use metadata::{MetadataPatch, ModelMetadata, ProductStatus, PHOTO_REALISTIC_PRODUCT_TYPE};
pub use order::{DeleteRequest, JobHandle, OperationStatus, WorkOrder};
pub use request::{IngestionRequest, NormalizedRequest, SourcesRequest};
pub use validation::ValidationOutcome;
