//! Header column detection by fuzzy label match.

/// Positions of the header labels within a table's flat cell list.
///
/// Each field holds the index of the last cell matching that column's
/// label; a later match replaces an earlier one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    /// Cell containing "description".
    pub description: Option<usize>,
    /// Cell equal to "qty".
    pub quantity: Option<usize>,
    /// Cell containing "unit" or "price".
    pub unit_price: Option<usize>,
    /// Cell equal to "tax".
    pub tax: Option<usize>,
    /// Cell containing "amount".
    pub amount: Option<usize>,
}

impl ColumnIndex {
    /// Scan cell texts for header labels.
    pub fn detect<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut columns = Self::default();

        for (idx, text) in texts.iter().enumerate() {
            let text = text.as_ref().trim().to_lowercase();
            if text.is_empty() {
                continue;
            }

            if text.contains("description") {
                columns.description = Some(idx);
            }
            if text == "qty" {
                columns.quantity = Some(idx);
            }
            if text.contains("unit") || text.contains("price") {
                columns.unit_price = Some(idx);
            }
            if text == "tax" {
                columns.tax = Some(idx);
            }
            if text.contains("amount") {
                columns.amount = Some(idx);
            }
        }

        columns
    }

    /// Whether the minimum header (description and amount) is present.
    pub fn is_confirmed(&self) -> bool {
        self.description.is_some() && self.amount.is_some()
    }
}
