pub mod accounting_entries;
pub mod branches;
pub mod brands;
pub mod customers;
pub mod device_models;
pub mod order_items;
pub mod order_parts;
pub mod orders;
pub mod part_models;
pub mod parts;
pub mod users;

pub use accounting_entries::Entity as AccountingEntries;
pub use branches::Entity as Branches;
pub use brands::Entity as Brands;
pub use customers::Entity as Customers;
pub use device_models::Entity as DeviceModels;
pub use order_items::Entity as OrderItems;
pub use order_parts::Entity as OrderParts;
pub use orders::Entity as Orders;
pub use part_models::Entity as PartModels;
pub use parts::Entity as Parts;
pub use users::Entity as Users;
