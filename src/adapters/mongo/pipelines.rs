//! Update pipelines for the atomic counter and like primitives.
//!
//! Each is a single-document update, so the read-modify-write happens
//! inside the server and concurrent callers cannot interleave.

use bson::{doc, Document};

/// `field = max(0, field + delta)`, treating a missing field as 0.
pub(crate) fn floored_add(field: &str, delta: i64) -> Vec<Document> {
    let current = format!("${}", field);
    vec![doc! {
        "$set": {
            field: {
                "$max": [0_i64, { "$add": [{ "$ifNull": [current, 0_i64] }, delta] }]
            }
        }
    }]
}

/// Removes `email` from `likes` if present, appends it otherwise, then
/// sets `likesCount` to the resulting array size.
pub(crate) fn toggle_like(email: &str) -> Vec<Document> {
    let likes = doc! { "$ifNull": ["$likes", []] };
    vec![
        doc! {
            "$set": {
                "likes": {
                    "$cond": [
                        { "$in": [email, likes.clone()] },
                        { "$filter": { "input": likes.clone(), "cond": { "$ne": ["$$this", email] } } },
                        { "$concatArrays": [likes, [email]] }
                    ]
                }
            }
        },
        doc! { "$set": { "likesCount": { "$size": "$likes" } } },
    ]
}
