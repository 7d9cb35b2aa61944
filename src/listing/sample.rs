use super::types::Listing;

const SAMPLE_IMAGES: [&str; 2] = ["./images/pic-1.jpeg", "./images/pic-2.jpeg"];

/// Built-in catalog used when no input file is given
pub fn sample_catalog() -> Vec<Listing> {
    vec![
        Listing::new("Shoes", "Nike", 39.95, 4.73)
            .with_buyers(["John", "Sam"])
            .with_images(SAMPLE_IMAGES)
            .with_tags(["shoes", "nike", "durable", "comfy"])
            .with_reviews(16),
        Listing::new("T-Shirt", "Levi's", 42.95, 4.73)
            .with_buyers(["Adam", "Sam"])
            .with_images(SAMPLE_IMAGES)
            .with_tags(["shirts", "levis", "durable", "comfy"])
            .with_reviews(54),
        Listing::new("Black pants", "New seller", 12.24, 2.25)
            .with_buyers(["Jane", "Tom"])
            .with_images(SAMPLE_IMAGES)
            .with_tags(["clothes", "pants", "durable", "comfy", "black"])
            .with_reviews(21),
        Listing::new("Blue Jacket", "New seller", 16.75, 3.98)
            .with_buyers(["Adam", "Isabelle"])
            .with_images(SAMPLE_IMAGES)
            .with_tags(["jackets", "warm", "durable", "comfy"])
            .with_reviews(6),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_is_well_formed() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.iter().all(|l| l.validate().is_empty()));
        assert!(catalog.iter().all(|l| l.scores().is_empty()));
    }
}
