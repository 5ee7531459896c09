/// Destination address collected at checkout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingAddress {
    pub country: String,
    pub state: String,
    pub city: String,
    pub postal_code: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
}

impl ShippingAddress {
    /// Single-line form used in order records
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address_line1.as_str()];
        if let Some(line2) = self.address_line2.as_deref() {
            parts.push(line2);
        }
        parts.push(self.city.as_str());

        format!(
            "{}, {} {}, {}",
            parts.join(", "),
            self.state,
            self.postal_code,
            self.country
        )
    }
}
