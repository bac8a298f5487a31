pub mod candidate;
pub mod crm;
pub mod extract;
