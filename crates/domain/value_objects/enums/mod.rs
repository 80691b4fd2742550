pub mod booking_statuses;
pub mod class_difficulties;
pub mod effective_statuses;
pub mod equipment_statuses;
pub mod member_statuses;
pub mod payment_methods;
pub mod payment_statuses;
pub mod plan_types;
pub mod trainer_availabilities;
