pub mod crm_service;
pub use crm_service::CrmService;
pub mod policy_service;
pub use policy_service::PolicyService;
pub mod user_service;
pub use user_service::UserService;
