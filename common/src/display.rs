use crate::product::Product;

/// Price above which the listing shows a "Deal" badge.
pub const DEAL_PRICE_THRESHOLD: f64 = 1000.0;

/// Classifier confidence formatted as a percentage, e.g. `"82.0%"`.
pub fn confidence_percent(product: &Product) -> String {
    format!("{:.1}%", product.pred_proba * 100.0)
}

/// Star rating in 3.0–5.0 derived from the classifier confidence.
pub fn rating(product: &Product) -> String {
    format!("{:.1}", product.pred_proba * 2.0 + 3.0)
}

/// Review count shown next to the rating; stable per product.
pub fn review_count(product: &Product) -> u64 {
    let seed = product.id.as_str().trim().parse::<u64>().unwrap_or(100);
    seed % 5000 + 100
}

pub fn is_deal(product: &Product) -> bool {
    product.price > DEAL_PRICE_THRESHOLD
}

pub fn verification_label(product: &Product) -> &'static str {
    if product.is_authentic() {
        "Blockchain Verified"
    } else {
        "Verification Pending"
    }
}

/// Brand is the first word of the name.
pub fn brand(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("Unknown")
}

/// Keyword classification of a product name into a garment type.
pub fn product_type(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(*w));
    // "t-shirt" contains "shirt", so check the longer keyword first
    if has(&["t-shirt", "tshirt"]) {
        "T-Shirt"
    } else if has(&["shirt"]) {
        "Shirt"
    } else if has(&["kurta"]) {
        "Kurta"
    } else if has(&["saree", "sari"]) {
        "Saree"
    } else if has(&["jeans"]) {
        "Jeans"
    } else if has(&["trouser", "pant"]) {
        "Trousers"
    } else if has(&["dress"]) {
        "Dress"
    } else if has(&["jacket"]) {
        "Jacket"
    } else if has(&["sweater"]) {
        "Sweater"
    } else if has(&["bag", "trolley"]) {
        "Bag"
    } else if has(&["watch"]) {
        "Watch"
    } else if has(&["shoe", "sneaker"]) {
        "Footwear"
    } else {
        "Garment"
    }
}

/// Format a price for display in the storefront's currency.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("₹{price:.0}")
    } else {
        format!("₹{price:.2}")
    }
}
