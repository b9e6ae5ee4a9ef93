use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::models::{ProductInfo, ShoppingResponse, ShoppingResult};

const UNKNOWN: &str = "unknown";

pub fn parse_search_response(query: &str, body: &str) -> Result<ProductInfo> {
    let response: ShoppingResponse = serde_json::from_str(body).map_err(|source| Error::Parse {
        what: "search response",
        source,
    })?;

    if let Some(message) = response.error {
        return Err(Error::Api {
            service: "SerpApi",
            status: StatusCode::OK,
            message,
        });
    }

    let first = response
        .shopping_results
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| Error::NoProducts(query.to_string()))?;

    let first: ShoppingResult = serde_json::from_value(first).map_err(|source| Error::Parse {
        what: "search result",
        source,
    })?;
    product_from_result(first)
}

fn product_from_result(result: ShoppingResult) -> Result<ProductInfo> {
    let title = result.title.ok_or(Error::MissingField("title"))?;
    let link = result
        .link
        .or(result.product_link)
        .ok_or(Error::MissingField("link"))?;

    Ok(ProductInfo {
        title,
        price: result.price.unwrap_or_else(|| UNKNOWN.into()),
        source: result.source.unwrap_or_else(|| UNKNOWN.into()),
        link,
    })
}
