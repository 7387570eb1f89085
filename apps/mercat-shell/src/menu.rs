//! # Menu
//!
//! The interactive loop. Generic over its reader and writer so tests can
//! drive it with scripted input.
//!
//! ## Menu Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  --- MAIN MENU ---                                                     │
//! │  1 ─► add_product ──► type, name, price, barcode, category field       │
//! │                      each field validated as soon as it is read        │
//! │  2 ─► show_cart ────► Cart::listing()                                  │
//! │  3 ─► checkout ─────► Cart::checkout() ─► text ticket or JSON          │
//! │  4 ─► search ───────► Cart::search()                                   │
//! │  0 ─► exit          (end of input also exits)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use mercat_core::validation::{
    validate_barcode, validate_composition, validate_expiry, validate_name, validate_price,
    validate_warranty_days,
};
use mercat_core::{Cart, Product, ProductType, Receipt};
use tracing::{debug, info, warn};

use crate::config::{ReceiptFormat, ShellConfig};
use crate::error::ShellError;

type ShellResult<T> = Result<T, ShellError>;

const MENU: &str = "\n--- MAIN MENU ---\n\
1. Add product\n\
2. Show cart\n\
3. Checkout\n\
4. Search product by barcode\n\
0. Exit\n";

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    AddProduct,
    ShowCart,
    Checkout,
    Search,
    Exit,
}

impl Command {
    fn parse(input: &str) -> ShellResult<Self> {
        match input.trim() {
            "1" => Ok(Command::AddProduct),
            "2" => Ok(Command::ShowCart),
            "3" => Ok(Command::Checkout),
            "4" => Ok(Command::Search),
            "0" => Ok(Command::Exit),
            other => Err(ShellError::InvalidOption(other.to_string())),
        }
    }
}

/// The console session: one cart, one input, one output.
pub struct Shell<R, W> {
    input: R,
    output: W,
    cart: Cart,
    config: ShellConfig,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: ShellConfig) -> Self {
        Shell {
            input,
            output,
            cart: Cart::new(),
            config,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the operator picks `0` or the input ends.
    pub fn run(&mut self) -> ShellResult<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            let result = self
                .prompt("Option: ")
                .and_then(|choice| Command::parse(&choice))
                .and_then(|command| {
                    debug!(?command, "menu command");
                    self.dispatch(command)
                });

            match result {
                Ok(true) => continue,
                Ok(false) => break,
                Err(ShellError::EndOfInput) => break,
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "action rejected");
                    writeln!(self.output, "Error: {}", e)?;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        Ok(())
    }

    /// Returns `false` when the loop should stop.
    fn dispatch(&mut self, command: Command) -> ShellResult<bool> {
        match command {
            Command::AddProduct => self.add_product()?,
            Command::ShowCart => self.show_cart()?,
            Command::Checkout => self.checkout()?,
            Command::Search => self.search()?,
            Command::Exit => return Ok(false),
        }
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    fn add_product(&mut self) -> ShellResult<()> {
        writeln!(self.output, "\n--- ADD PRODUCT ---")?;

        let product_type: ProductType = self
            .prompt("Product type (perishable, textile, electronic): ")?
            .parse()?;

        let name = self.prompt("Name: ")?;
        validate_name(&name)?;

        let price_input = self.prompt("Price: ")?;
        let price: f64 = parse_number("price", &price_input)?;
        validate_price(price)?;

        let barcode = self.prompt("Barcode: ")?;
        validate_barcode(&barcode)?;

        let product = match product_type {
            ProductType::Perishable => {
                let input = self.prompt("Expiry date (YYYY-MM-DD): ")?;
                let expiry = NaiveDate::parse_from_str(&input, "%Y-%m-%d")
                    .map_err(|_| ShellError::InvalidDate(input.clone()))?;
                validate_expiry(expiry)?;
                Product::perishable(name, price, barcode, expiry)?
            }
            ProductType::Textile => {
                let composition = self.prompt("Composition (cotton, wool, silk): ")?;
                validate_composition(&composition)?;
                Product::textile(name, price, barcode, composition)?
            }
            ProductType::Electronic => {
                let input = self.prompt("Warranty days: ")?;
                let days: i64 = parse_number("warranty", &input)?;
                validate_warranty_days(days)?;
                Product::electronic(name, price, barcode, days)?
            }
        };

        let barcode = product.barcode().to_string();
        self.cart.add_product(product)?;
        info!(
            barcode = %barcode,
            category = %product_type,
            distinct = self.cart.len(),
            "product added"
        );
        writeln!(self.output, "Product added.")?;
        Ok(())
    }

    fn show_cart(&mut self) -> ShellResult<()> {
        writeln!(self.output, "----- CART -----")?;
        writeln!(self.output, "{}", self.cart.listing())?;
        Ok(())
    }

    fn checkout(&mut self) -> ShellResult<()> {
        let receipt = self.cart.checkout();
        info!(
            receipt_id = %receipt.id,
            lines = receipt.lines.len(),
            total = %receipt.grand_total(),
            "checkout"
        );
        self.write_receipt(&receipt)
    }

    fn write_receipt(&mut self, receipt: &Receipt) -> ShellResult<()> {
        match self.config.receipt_format {
            ReceiptFormat::Text => {
                write!(self.output, "\n{}", receipt.render(&self.config.store_name))?;
            }
            ReceiptFormat::Json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(receipt)?)?;
            }
        }
        Ok(())
    }

    fn search(&mut self) -> ShellResult<()> {
        let barcode = self.prompt("Barcode: ")?;
        match self.cart.search(&barcode) {
            Some(product) => writeln!(self.output, "Product found: {}", product)?,
            None => writeln!(self.output, "No product found with that barcode.")?,
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Writes a prompt and reads one line, without surrounding whitespace.
    ///
    /// The whole line is consumed before decoding, so a line that is not
    /// UTF-8 is reported as [`ShellError::InvalidInput`] and the next prompt
    /// starts on the following line.
    fn prompt(&mut self, label: &str) -> ShellResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        let line = String::from_utf8(raw).map_err(|_| ShellError::InvalidInput)?;
        Ok(line.trim().to_string())
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, input: &str) -> ShellResult<T> {
    input.parse().map_err(|_| ShellError::InvalidNumber {
        field,
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_bytes(script: &[u8], config: ShellConfig) -> (String, Cart) {
        let mut shell = Shell::new(script, Vec::new(), config);
        shell.run().unwrap();
        let cart = shell.cart().clone();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (output, cart)
    }

    fn run_script(script: &str, config: ShellConfig) -> (String, Cart) {
        run_bytes(script.as_bytes(), config)
    }

    fn run(script: &str) -> (String, Cart) {
        run_script(script, ShellConfig::default())
    }

    const ADD_JERSEI: &str = "1\ntextile\nJersei\n10\n111\nwool\n";
    const ADD_BUFANDA: &str = "1\ntextile\nBufanda\n5\n222\nSILK\n";

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let (output, cart) = run("");
        assert!(output.contains("--- MAIN MENU ---"));
        assert!(output.ends_with("Exiting...\n"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_and_show_cart() {
        let script = format!("{ADD_JERSEI}{ADD_JERSEI}2\n0\n");
        let (output, cart) = run(&script);

        assert_eq!(cart.quantity_of("111"), Some(2));
        assert!(output.contains("Product added."));
        assert!(output.contains("----- CART -----\nJersei - 2 units\n"));
    }

    #[test]
    fn test_show_empty_cart() {
        let (output, _) = run("2\n0\n");
        assert!(output.contains("cart is empty"));
    }

    #[test]
    fn test_invalid_price_leaves_cart_untouched() {
        let (output, cart) = run("1\nelectronic\nRadio\n0\n0\n");
        assert!(output.contains("Error: price cannot be negative or zero"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_non_numeric_price() {
        let (output, cart) = run("1\nelectronic\nRadio\ncheap\n0\n");
        assert!(output.contains("Error: price must be a number, got 'cheap'"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_invalid_category_and_option() {
        let (output, _) = run("1\nfurniture\n9\n0\n");
        assert!(output.contains("Error: invalid product type 'furniture'"));
        assert!(output.contains("Error: Invalid option '9'. Try again."));
    }

    #[test]
    fn test_invalid_composition_and_date() {
        let (output, cart) = run(
            "1\ntextile\nJaqueta\n40\n333\npolyester\n\
             1\nperishable\nLlet\n1.2\n444\n31/12/2999\n0\n",
        );
        assert!(output.contains("composition must be one of: cotton, wool, silk"));
        assert!(output.contains("'31/12/2999' is not a valid date"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_perishable_and_electronic() {
        let (_, cart) = run(
            "1\nperishable\nLlet\n1.2\n444\n2999-12-31\n\
             1\nelectronic\nPortatil\n100\n555\n365\n0\n",
        );
        assert_eq!(cart.len(), 2);
        assert!(cart.search("444").is_some());
        assert!(cart.search("555").is_some());
    }

    #[test]
    fn test_checkout_prints_ticket_and_empties_cart() {
        let script = format!("{ADD_JERSEI}{ADD_JERSEI}{ADD_BUFANDA}3\n0\n");
        let (output, cart) = run(&script);

        assert!(output.contains("--------- SAPAMERCAT ---------"));
        assert!(output.contains("Bufanda     1  5.00 EUR  5.00 EUR"));
        assert!(output.contains("Jersei      2  10.00 EUR  20.00 EUR"));
        assert!(output.contains("Total: 25.00 EUR"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_as_json() {
        let config = ShellConfig {
            receipt_format: ReceiptFormat::Json,
            ..ShellConfig::default()
        };
        let (output, _) = run_script("1\nelectronic\nPortatil\n100\n555\n365\n3\n0\n", config);
        assert!(output.contains("\"grand_total\": 110.0"));
        assert!(output.contains("\"barcode\": \"555\""));
    }

    #[test]
    fn test_search() {
        let script = format!("{ADD_JERSEI}4\n111\n4\n999\n0\n");
        let (output, _) = run(&script);
        assert!(output.contains("Product found: Jersei (111) - 10.00 EUR | Composition: wool"));
        assert!(output.contains("No product found with that barcode."));
    }

    #[test]
    fn test_invalid_utf8_line_is_rejected_and_loop_continues() {
        let mut script = b"\xff\xfe\n1\ntextile\n\xc3\x28\n".to_vec();
        script.extend_from_slice(ADD_JERSEI.as_bytes());
        script.extend_from_slice(b"0\n");

        let (output, cart) = run_bytes(&script, ShellConfig::default());

        assert_eq!(output.matches("Error: input is not valid UTF-8").count(), 2);
        assert_eq!(cart.quantity_of("111"), Some(1));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_end_of_input_mid_action() {
        let (output, cart) = run("1\ntextile\nJersei\n");
        assert!(output.ends_with("Exiting...\n"));
        assert!(cart.is_empty());
    }
}
