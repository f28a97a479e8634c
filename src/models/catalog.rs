use serde::{Deserialize, Serialize};

/// Stylist id meaning "no preference".
pub const ANY_STYLIST: &str = "any";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stylist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub stylists: Vec<Stylist>,
}

impl Catalog {
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Looks up a stylist, treating an empty id as the "any" sentinel.
    pub fn stylist(&self, id: &str) -> Option<&Stylist> {
        let id = if id.is_empty() { ANY_STYLIST } else { id };
        self.stylists.iter().find(|s| s.id == id)
    }

    pub fn service_name(&self, id: &str) -> String {
        self.service(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn stylist_name(&self, id: &str) -> String {
        self.stylist(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let service = |id: &str, name: &str, price: &str, duration: &str| Service {
            id: id.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            duration: duration.to_string(),
        };
        let stylist = |id: &str, name: &str| Stylist {
            id: id.to_string(),
            name: name.to_string(),
        };

        Self {
            services: vec![
                service("haircut", "Haircut", "$25", "30 min"),
                service("beard-trim", "Beard Trim", "$15", "20 min"),
                service("shave", "Classic Shave", "$20", "25 min"),
                service("haircut-beard", "Haircut + Beard Package", "$35", "45 min"),
                service("deluxe-package", "Deluxe Package", "$50", "60 min"),
            ],
            stylists: vec![
                stylist(ANY_STYLIST, "Any Available Stylist"),
                stylist("john", "John Smith - Senior Barber"),
                stylist("mike", "Mike Johnson - Master Stylist"),
                stylist("alex", "Alex Brown - Traditional Barber"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.services.len(), 5);
        assert_eq!(catalog.stylists.len(), 4);
        assert_eq!(catalog.stylists[0].id, ANY_STYLIST);
    }

    #[test]
    fn test_service_lookup() {
        let catalog = Catalog::default();
        assert_eq!(catalog.service_name("shave"), "Classic Shave");
        assert_eq!(catalog.service("deluxe-package").unwrap().price, "$50");
        assert!(catalog.service("perm").is_none());
    }

    #[test]
    fn test_empty_stylist_resolves_to_any() {
        let catalog = Catalog::default();
        assert_eq!(catalog.stylist_name(""), "Any Available Stylist");
        assert_eq!(catalog.stylist_name("mike"), "Mike Johnson - Master Stylist");
    }

    #[test]
    fn test_unknown_ids_fall_back_to_id() {
        let catalog = Catalog::default();
        assert_eq!(catalog.service_name("perm"), "perm");
        assert_eq!(catalog.stylist_name("zoe"), "zoe");
    }
}
