use thiserror::Error;

/// Errors raised while building a forest or moving it to and from files.
#[derive(Debug, Error)]
pub enum TreeError<K> {
    #[error("parent node not found for node id={id}, parent_id={parent_id}")]
    ParentNotFound { id: K, parent_id: K },
    #[error("forest is {levels} levels deep, at most {limit} can be written")]
    TooDeep { levels: usize, limit: usize },
    #[error("File error: {source}")]
    File {
        #[from]
        source: serdeio::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

pub type TreeResult<T, K> = Result<T, TreeError<K>>;
