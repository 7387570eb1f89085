//! # mercat-core: Pure Business Logic for Mercat
//!
//! This crate is the pricing and cart engine of the Mercat point-of-sale
//! simulator. Everything here is a pure function or an in-memory value;
//! the console shell collects raw input and calls into this crate with
//! already-parsed values.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Mercat Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    mercat-shell (console)                       │   │
//! │  │    Menu ──► Add Product ──► Show Cart ──► Checkout ──► Search   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ parsed values                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mercat-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ validation│  │  product  │  │ ordering  │  │   cart    │  │   │
//! │  │   │   rules   │  │  Product  │  │ by_price  │  │   Cart    │  │   │
//! │  │   │   checks  │  │ Category  │  │ by_comp.  │  │  Receipt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STDIN • NO ENVIRONMENT • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`validation`] - Field legality checks (price, barcode, name, ...)
//! - [`product`] - The three product categories and their pricing
//! - [`ordering`] - Comparators used for listings and receipts
//! - [`cart`] - Cart aggregation, listing and checkout
//! - [`money`] - Two-decimal currency rendering
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use mercat_core::{Calculable, Cart, Product};
//!
//! let mut cart = Cart::new();
//! let laptop = Product::electronic("Portatil", 100.0, "12345", 365).unwrap();
//! assert!((laptop.compute_price() - 110.0).abs() < 1e-9);
//!
//! cart.add_product(laptop).unwrap();
//! let receipt = cart.checkout();
//! assert_eq!(receipt.lines.len(), 1);
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod ordering;
pub mod product;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartListing, ListingLine, Receipt, ReceiptLine};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use product::{Calculable, Category, Electronic, Perishable, Product, ProductType, Textile};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct products (barcodes) a cart can hold.
///
/// Quantities of a product already in the cart are not limited by this.
pub const MAX_CART_PRODUCTS: usize = 100;

/// Maximum barcode length (EAN-13).
pub const MAX_BARCODE_LEN: usize = 13;

/// Maximum length of a textile composition string.
pub const MAX_COMPOSITION_LEN: usize = 100;

/// Accepted textile compositions, compared case-insensitively.
pub const VALID_COMPOSITIONS: [&str; 3] = ["cotton", "wool", "silk"];

/// Currency label printed after every amount.
pub const CURRENCY: &str = "EUR";
