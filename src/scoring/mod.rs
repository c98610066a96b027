// Scoring — turning per-sentence similarities into a document verdict.

pub mod aggregate;
