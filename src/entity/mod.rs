pub mod plants;

pub use plants::Entity as Plants;
