//! Product catalog
//!
//! The storefront's small fixed catalog. Featured is a real variant, not
//! an optional flag, so every consumer matches exhaustively.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Fields shared by every product. Prices are integer centavos (BRL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image: String,
}

/// A storefront product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Product {
    Regular(ProductInfo),
    /// Promoted product shown in the highlight slot
    Featured(ProductInfo),
}

impl Product {
    pub fn info(&self) -> &ProductInfo {
        match self {
            Product::Regular(info) | Product::Featured(info) => info,
        }
    }

    pub fn is_featured(&self) -> bool {
        matches!(self, Product::Featured(_))
    }
}

/// Render centavos as "R$ 29,90".
pub fn format_price(cents: i64) -> String {
    format!("R$ {},{:02}", cents / 100, cents % 100)
}

fn info(id: u32, name: &str, description: &str, price_cents: i64, image: &str) -> ProductInfo {
    ProductInfo {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price_cents,
        image: image.to_string(),
    }
}

/// The storefront catalog.
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            products: vec![
                Product::Featured(info(
                    1,
                    "Pulseira QR Cristã",
                    "Conecte-se instantaneamente ao verso do dia",
                    29_90,
                    "https://images.unsplash.com/photo-1515562141207-7a88fb7ce338",
                )),
                Product::Regular(info(
                    2,
                    "Bíblia de Estudo",
                    "Tradução ACF com notas",
                    89_90,
                    "https://images.unsplash.com/photo-1481627834876-b7833e8f5570",
                )),
                Product::Regular(info(
                    3,
                    "Camiseta Fé",
                    "100% algodão cristão",
                    39_90,
                    "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab",
                )),
                Product::Regular(info(
                    4,
                    "Caneca Inspiração",
                    "Para seus momentos com Deus",
                    24_90,
                    "https://images.unsplash.com/photo-1514228742587-6b1558fcf93a",
                )),
                Product::Regular(info(
                    5,
                    "Quadro Versículo",
                    "Decoração cristã",
                    59_90,
                    "https://images.unsplash.com/photo-1578662996442-48f60103fc96",
                )),
            ],
        }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product, surfacing not-found as a terminal error the
    /// checkout screen can show.
    pub fn get(&self, id: u32) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.info().id == id)
            .ok_or_else(|| AppError::ProductNotFound(id.to_string()))
    }

    pub fn featured(&self) -> Option<&Product> {
        self.products.iter().find(|p| p.is_featured())
    }

    pub fn regular(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| !p.is_featured()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_product() {
        let catalog = ProductCatalog::builtin();

        let product = catalog.get(2).unwrap();
        assert_eq!(product.info().name, "Bíblia de Estudo");
        assert!(!product.is_featured());
    }

    #[test]
    fn test_get_unknown_product_is_terminal_error() {
        let catalog = ProductCatalog::builtin();

        assert!(matches!(
            catalog.get(99),
            Err(AppError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_featured_split_is_exhaustive() {
        let catalog = ProductCatalog::builtin();

        let featured = catalog.featured().unwrap();
        assert_eq!(featured.info().id, 1);
        assert_eq!(catalog.regular().len(), catalog.all().len() - 1);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(29_90), "R$ 29,90");
        assert_eq!(format_price(100), "R$ 1,00");
        assert_eq!(format_price(5), "R$ 0,05");
    }
}
