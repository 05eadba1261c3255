pub mod crm;
pub mod dashboard;
pub mod nav;
pub mod policies;
pub mod settings;
pub mod users;
