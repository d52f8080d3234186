use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use stockline_catalog::{
    top_stock_per_branch, Branch, BranchRepository, CatalogUseCases, Franchise,
    FranchiseRepository, Product, ProductRepository,
};
use stockline_core::{BranchId, Entity, FranchiseId, IdStrategy, ProductId};
use stockline_infra::InMemoryCatalogStore;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

/// Flat product list spread over `branches` branches.
fn catalog(products: usize, branches: i64) -> Vec<Product> {
    (0..products as i64)
        .map(|i| {
            Product::restore(
                ProductId::numeric(i + 1),
                format!("product-{i}"),
                (i * 7919 % 1000) as u32,
                BranchId::numeric(i % branches + 1),
            )
        })
        .collect()
}

fn seeded_store(
    rt: &tokio::runtime::Runtime,
    branches: usize,
    products_per_branch: usize,
) -> (Arc<InMemoryCatalogStore>, FranchiseId) {
    rt.block_on(async {
        let store = Arc::new(InMemoryCatalogStore::new());
        let franchise = FranchiseRepository::save(&*store, Franchise::new("bench"))
            .await
            .unwrap();
        let franchise_id = franchise.id().cloned().unwrap();

        for b in 0..branches {
            let branch =
                BranchRepository::save(&*store, Branch::new(franchise_id.clone(), format!("b{b}")))
                    .await
                    .unwrap();
            let branch_id = branch.id().cloned().unwrap();
            for p in 0..products_per_branch {
                ProductRepository::save(
                    &*store,
                    Product::new(branch_id.clone(), format!("p{p}"), (p * 31 % 97) as u32),
                )
                .await
                .unwrap();
            }
        }

        (store, franchise_id)
    })
}

fn bench_in_process_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_stock_per_branch");

    for size in [100usize, 1_000, 10_000].iter() {
        let products = catalog(*size, 20);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("reduce", size), &products, |b, products| {
            b.iter(|| top_stock_per_branch(black_box(products.clone())));
        });
    }

    group.finish();
}

fn bench_top_stock_use_case(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("top_stock_use_case");

    for branches in [1usize, 10, 50].iter() {
        let (store, franchise_id) = seeded_store(&rt, *branches, 50);
        let use_cases = CatalogUseCases::from_store(store, IdStrategy::Sequence);

        group.bench_with_input(
            BenchmarkId::new("in_memory_store", branches),
            &franchise_id,
            |b, franchise_id| {
                b.iter(|| {
                    rt.block_on(use_cases.top_stock_products.execute(franchise_id.clone()))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_stock_update(c: &mut Criterion) {
    let rt = runtime();
    let (store, franchise_id) = seeded_store(&rt, 1, 100);
    let use_cases = CatalogUseCases::from_store(store.clone(), IdStrategy::Sequence);
    let product_id = rt
        .block_on(store.find_top_stock_by_branches_in_franchise(&franchise_id))
        .unwrap()
        .first()
        .and_then(|p| p.id().cloned())
        .unwrap();

    let mut group = c.benchmark_group("stock_update");
    group.sample_size(1000);
    group.bench_function("update_product_stock", |b| {
        let mut stock = 0u32;
        b.iter(|| {
            stock = stock.wrapping_add(1);
            rt.block_on(
                use_cases
                    .update_product_stock
                    .execute(product_id.clone(), black_box(stock)),
            )
            .unwrap()
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_in_process_selection,
    bench_top_stock_use_case,
    bench_stock_update
);
criterion_main!(benches);
