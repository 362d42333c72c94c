//! Application services for engine registration and reporting.

mod deployed_state;
mod inventory;
mod registration;

pub use deployed_state::{
    DeployedStateService, DeployedStateServiceError, DeployedStateServiceResult,
};
pub use inventory::{
    EngineInventoryService, EngineInventoryServiceError, EngineInventoryServiceResult,
};
pub use registration::{
    DEFAULT_ACTIVATION_TIMEOUT, EngineActivationError, EngineRegistrationService,
    EngineRegistrationServiceError, EngineRegistrationServiceResult, RegisterEnginesRequest,
};
