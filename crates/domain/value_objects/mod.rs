pub mod check_ins;
pub mod classes;
pub mod dashboard;
pub mod enums;
pub mod equipment;
pub mod members;
pub mod membership_plans;
pub mod payments;
pub mod trainers;
