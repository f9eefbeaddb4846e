//! Item — a tracked physical device with a price and a stock quantity.
//!
//! The item's display name doubles as the key routines use to refer to it.

use serde::{Deserialize, Serialize};

use crate::error::{InvHubError, ValidationError};
use crate::id::ItemId;
use crate::record::{Record, RecordKind, require_name};

/// A device kept in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl Item {
    /// Create a builder for constructing an [`Item`].
    #[must_use]
    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }

    /// An item with no units left is shown as out of stock.
    #[must_use]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }

    /// Price formatted for display, e.g. `$4.50`.
    #[must_use]
    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Take one unit out of stock.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfStock`] when no unit is left.
    pub fn sell_one(&mut self) -> Result<(), InvHubError> {
        if self.is_out_of_stock() {
            return Err(ValidationError::OutOfStock.into());
        }
        self.quantity -= 1;
        Ok(())
    }
}

impl Record for Item {
    type Id = ItemId;

    const KIND: RecordKind = RecordKind::Item;

    fn id(&self) -> ItemId {
        self.id
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    /// # Errors
    ///
    /// Returns [`InvHubError::Validation`] when `name` is blank or
    /// `quantity` is negative.
    fn validate(&self) -> Result<(), InvHubError> {
        require_name(&self.name)?;
        if self.quantity < 0 {
            return Err(ValidationError::NegativeQuantity.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Item`].
#[derive(Debug, Default)]
pub struct ItemBuilder {
    id: Option<ItemId>,
    name: Option<String>,
    price: f64,
    quantity: i64,
}

impl ItemBuilder {
    #[must_use]
    pub fn id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Consume the builder, validate, and return an [`Item`].
    ///
    /// # Errors
    ///
    /// Returns [`InvHubError::Validation`] if `name` is missing or blank,
    /// or `quantity` is negative.
    pub fn build(self) -> Result<Item, InvHubError> {
        let item = Item {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            price: self.price,
            quantity: self.quantity,
        };
        item.validate()?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp(quantity: i64) -> Item {
        Item::builder()
            .name("Desk lamp")
            .price(4.5)
            .quantity(quantity)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_item_when_name_provided() {
        let item = lamp(3);
        assert_eq!(item.name, "Desk lamp");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn should_return_validation_error_when_name_is_blank() {
        let result = Item::builder().name("   ").build();
        assert!(matches!(
            result,
            Err(InvHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_quantity_is_negative() {
        let result = Item::builder().name("Fan").quantity(-1).build();
        assert!(matches!(
            result,
            Err(InvHubError::Validation(ValidationError::NegativeQuantity))
        ));
    }

    #[test]
    fn should_be_out_of_stock_when_quantity_is_zero() {
        assert!(lamp(0).is_out_of_stock());
        assert!(!lamp(1).is_out_of_stock());
    }

    #[test]
    fn should_decrement_quantity_when_selling_one() {
        let mut item = lamp(2);
        item.sell_one().unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn should_refuse_to_sell_when_out_of_stock() {
        let mut item = lamp(0);
        let result = item.sell_one();
        assert!(matches!(
            result,
            Err(InvHubError::Validation(ValidationError::OutOfStock))
        ));
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn should_format_price_with_two_decimals() {
        assert_eq!(lamp(1).formatted_price(), "$4.50");
    }

    #[test]
    fn should_assign_fresh_id_when_deserializing_without_one() {
        let item: Item =
            serde_json::from_str(r#"{"name":"Fan","price":12.0,"quantity":2}"#).unwrap();
        assert_eq!(item.name, "Fan");
        assert_eq!(item.quantity, 2);
    }
}
