use tracing::warn;

use crate::error::{Error, Result};
use crate::gemini::TextGenerator;
use crate::models::{KeywordList, ProductInfo};

pub fn keyword_prompt(product: &ProductInfo) -> String {
    format!(
        "You are an SEO expert. Based on the following product information, generate 3-4 relevant, long-tail SEO keywords.\n\
         These keywords should be what a customer might search for when looking to buy this product.\n\
         Return only the keywords, separated by commas. Do not add any extra text or labels.\n\
         \n\
         Product Title: {}\n\
         Product Price: {}\n\
         Sold By: {}\n",
        product.title, product.price, product.source
    )
}

pub fn parse_keywords(text: &str) -> Result<KeywordList> {
    let keywords: KeywordList = text
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();

    if keywords.is_empty() {
        return Err(Error::NoKeywords);
    }
    Ok(keywords)
}

pub fn generate_keywords(model: &dyn TextGenerator, product: &ProductInfo) -> Result<KeywordList> {
    let text = model.generate(&keyword_prompt(product))?;
    let keywords = parse_keywords(&text)?;

    if !(3..=4).contains(&keywords.len()) {
        warn!("Expected 3-4 keywords, model returned {}", keywords.len());
    }
    Ok(keywords)
}

pub fn article_prompt(product: &ProductInfo, keywords: &[String]) -> String {
    format!(
        "You are a friendly and persuasive blog writer. Write a short blog post of about 150-200 words for the following product.\n\
         The tone should be enthusiastic and helpful.\n\
         Start with an engaging headline.\n\
         Naturally incorporate the following SEO keywords into the text: {}.\n\
         End with a call to action inviting readers to check out the product link.\n\
         \n\
         Product Title: {}\n\
         Price: {}\n\
         Available at: {}\n",
        keywords.join(", "),
        product.title,
        product.price,
        product.source
    )
}

pub fn write_article(
    model: &dyn TextGenerator,
    product: &ProductInfo,
    keywords: &[String],
) -> Result<String> {
    let article = model.generate(&article_prompt(product, keywords))?.trim().to_string();
    if article.is_empty() {
        return Err(Error::EmptyGeneration);
    }

    let lowered = article.to_lowercase();
    for keyword in keywords {
        if !lowered.contains(&keyword.to_lowercase()) {
            warn!("Article does not mention keyword '{keyword}'");
        }
    }
    Ok(article)
}
