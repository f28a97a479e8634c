use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Phone,
    Email,
    Whatsapp,
}

impl CustomerField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::Phone => "phone",
            CustomerField::Email => "email",
            CustomerField::Whatsapp => "whatsapp",
        }
    }
}

impl CustomerDetails {
    pub fn set(&mut self, field: CustomerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CustomerField::Name => self.name = value,
            CustomerField::Phone => self.phone = value,
            CustomerField::Email => self.email = value,
            CustomerField::Whatsapp => self.whatsapp = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
