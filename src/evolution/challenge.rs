use crate::error::Result;
use crate::phenotype::Phenotype;

/// Scores a phenotype. Lower penalties are better.
///
/// Implementations must be deterministic: selection and acceptance compare
/// penalties of different candidates and rely on equal inputs scoring equally.
pub trait Challenge<Pheno: Phenotype>: Send + Sync {
    fn penalty(&self, phenotype: &Pheno) -> Result<i64>;
}
