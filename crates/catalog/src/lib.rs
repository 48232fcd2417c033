//! `stockwise-catalog` — products, categories and suppliers.
//!
//! Models, store ports and thin services enforcing existence and
//! uniqueness rules. Storage adapters live in `stockwise-store`.

pub mod category;
pub mod product;
pub mod supplier;

pub use category::{Category, CategoryService, CategoryStore};
pub use product::{NewProduct, Product, ProductPatch, ProductService, ProductStore, Unit};
pub use supplier::{Supplier, SupplierPatch, SupplierService, SupplierStore};
