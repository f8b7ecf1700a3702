pub mod campaign;
pub mod health;
pub mod hoarding;
pub mod v1;
