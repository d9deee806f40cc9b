use mongodb::error::{
    ErrorKind, WriteFailure, TRANSIENT_TRANSACTION_ERROR, UNKNOWN_TRANSACTION_COMMIT_RESULT,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("insert unique violation")]
    InsertUniqueViolation,

    #[error("no document updated")]
    NoDocumentUpdated,

    #[error("transaction conflict: {0}")]
    TransactionConflict(mongodb::error::Error),

    #[error("ticket code collision")]
    TicketCodeCollision,

    #[error("mongo error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

const DUPLICATE_KEY_CODE: i32 = 11000;

///
/// Checks if error was caused by a violation of an unique index
///
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::InsertMany(ref insert_many_error) => insert_many_error
            .write_errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|err| err.code == DUPLICATE_KEY_CODE)),
        ErrorKind::Command(ref command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

///
/// Transaction errors that are safe to retry by running the whole
/// transaction again
///
pub fn is_transaction_conflict(err: &mongodb::error::Error) -> bool {
    err.contains_label(TRANSIENT_TRANSACTION_ERROR)
        || err.contains_label(UNKNOWN_TRANSACTION_COMMIT_RESULT)
}
