use crate::models;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

// NUMERIC(9,2): seven integer digits, two fraction digits
const MAX_PRICE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

fn check_price(price: &Decimal) -> Result<(), serde_valid::validation::Error> {
    if price.is_sign_negative() {
        return Err(serde_valid::validation::Error::Custom(
            "Ensure this value is greater than or equal to 0.".to_string(),
        ));
    }
    if *price >= MAX_PRICE {
        return Err(serde_valid::validation::Error::Custom(
            "Ensure that there are no more than 7 digits before the decimal point.".to_string(),
        ));
    }
    if price.normalize().scale() > 2 {
        return Err(serde_valid::validation::Error::Custom(
            "Ensure that there are no more than 2 decimal places.".to_string(),
        ));
    }

    Ok(())
}

fn optional_price_fits(price: &Option<Decimal>) -> Result<(), serde_valid::validation::Error> {
    match price {
        Some(price) => check_price(price),
        None => Ok(()),
    }
}

/// Body of `POST /product` and `PUT /product/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct ProductForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(custom(check_price))]
    pub price: Decimal,
}

impl ProductForm {
    pub fn update(self, product: &mut models::Product) {
        product.name = self.name;
        product.price = self.price.round_dp(2);
    }
}

impl From<ProductForm> for models::Product {
    fn from(form: ProductForm) -> Self {
        let mut product = models::Product::default();
        form.update(&mut product);

        product
    }
}

/// Body of `PATCH /product/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct ProductPatchForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: Option<String>,
    #[validate(custom(optional_price_fits))]
    pub price: Option<Decimal>,
}

impl ProductPatchForm {
    pub fn update(self, product: &mut models::Product) {
        if let Some(name) = self.name {
            product.name = name;
        }

        if let Some(price) = self.price {
            product.price = price.round_dp(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn price_accepts_string_and_number() {
        let form: ProductForm = serde_json::from_str(r#"{"name": "book", "price": "26.00"}"#).unwrap();
        assert_eq!(form.price, Decimal::new(26, 0));
        assert!(form.validate().is_ok());

        let form: ProductForm = serde_json::from_str(r#"{"name": "book", "price": 27}"#).unwrap();
        assert_eq!(form.price, Decimal::new(27, 0));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let form = ProductForm {
            name: String::new(),
            price: Decimal::ONE,
        };
        let errors = form.validate().unwrap_err().to_string();
        assert!(errors.contains("name"), "{}", errors);
    }

    #[test]
    fn rejects_out_of_range_prices() {
        for price in ["-1", "10000000", "1.005"] {
            let form = ProductForm {
                name: "book".to_string(),
                price: Decimal::from_str(price).unwrap(),
            };
            assert!(form.validate().is_err(), "{} should be rejected", price);
        }

        let form = ProductForm {
            name: "book".to_string(),
            price: Decimal::from_str("9999999.99").unwrap(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn trailing_zeros_do_not_count_as_decimal_places() {
        let form = ProductForm {
            name: "book".to_string(),
            price: Decimal::from_str("12.5000").unwrap(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let mut product = models::Product {
            id: 1,
            name: "book_1".to_string(),
            price: Decimal::new(26, 0),
            owner_id: Some(3),
            rating: None,
        };
        let patch = ProductPatchForm {
            price: Some(Decimal::new(30, 0)),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        patch.update(&mut product);
        assert_eq!(product.name, "book_1");
        assert_eq!(product.price, Decimal::new(30, 0));
        assert_eq!(product.owner_id, Some(3));
    }

    #[test]
    fn patch_validates_present_fields() {
        let patch = ProductPatchForm {
            name: Some(String::new()),
            price: Some(Decimal::new(-5, 0)),
        };
        let errors = patch.validate().unwrap_err().to_string();
        assert!(errors.contains("name"), "{}", errors);
        assert!(errors.contains("price"), "{}", errors);
    }
}
