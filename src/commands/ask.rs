//! `asi-search ask` command.

use serde_json::json;

use crate::config::ApiKeys;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::handler::SearchHandler;

/// Execute the `ask` command: answer `query` and print the answer text.
///
/// # Errors
///
/// Returns the handler's error unchanged.
pub async fn run<F>(handler: &SearchHandler<F>, query: &str) -> Result<()>
where
    F: Fn(&ApiKeys) -> Result<ServiceContext>,
{
    let answer = handler.answer(&json!({ "search_query": query })).await?;
    println!("{answer}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::config::{ApiKeys, Credentials};
    use crate::error::Error;
    use crate::handler::SearchHandler;

    #[tokio::test]
    async fn empty_query_is_rejected_before_connecting() {
        let handler = SearchHandler::new(Credentials::default(), |_keys: &ApiKeys| {
            Err(Error::Agent("should not connect".into()))
        });
        assert_eq!(run(&handler, "").await, Err(Error::MissingQuery));
    }
}
