//! In-process top-stock selection.
//!
//! Grouped top-1: for each branch, the product with the greatest stock; ties
//! resolve to the lowest product id so repeated queries return the same rows.
//! Stores that cannot push the query down load the franchise's products and
//! reduce them here.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use stockline_core::{BranchId, Entity};

use crate::Product;

/// Reduce `products` to one top-stock product per branch.
///
/// Callers restrict the input to the branches of a single franchise. Output is
/// ordered by branch id. Products without an identifier lose every tie.
pub fn top_stock_per_branch<I>(products: I) -> Vec<Product>
where
    I: IntoIterator<Item = Product>,
{
    let mut best: BTreeMap<BranchId, Product> = BTreeMap::new();

    for product in products {
        let replace = best
            .get(product.branch_id())
            .is_none_or(|current| outranks(&product, current));
        if replace {
            best.insert(product.branch_id().clone(), product);
        }
    }

    best.into_values().collect()
}

fn outranks(candidate: &Product, current: &Product) -> bool {
    match candidate.stock().cmp(&current.stock()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match (candidate.id(), current.id()) {
            (Some(c), Some(k)) => c < k,
            (Some(_), None) => true,
            (None, _) => false,
        },
    }
}
