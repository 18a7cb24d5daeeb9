use burgerbox::{Cart, Flow, FlowError, FlowState, LineKey, MemoryStore, PriceTable, Product, StepControl};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Clone, Debug, Default)]
struct BenchContext {
  counter: u64,
}

fn bench_product(idx: usize) -> Product {
  Product {
    id: format!("burger_{}", idx),
    name: format!("Burger {}", idx),
    description: String::new(),
    category: Default::default(),
    variants: vec!["small".into(), "medium".into(), "large".into()],
    prices: [("small", 100u64), ("medium", 150), ("large", 200)]
      .into_iter()
      .collect::<PriceTable>(),
    image: String::new(),
  }
}

// --- Cart ---

fn bench_cart_add_and_merge(c: &mut Criterion) {
  let mut group = c.benchmark_group("CartAddMerge");

  for num_products in [1usize, 10, 50].iter() {
    let products: Vec<Product> = (0..*num_products).map(bench_product).collect();
    group.throughput(Throughput::Elements(*num_products as u64 * 3));
    group.bench_with_input(BenchmarkId::from_parameter(num_products), &products, |b, products| {
      b.iter_batched(
        || Cart::empty(Arc::new(MemoryStore::new())),
        |mut cart| {
          for product in products {
            for variant in ["small", "medium", "large"] {
              cart.add_to_cart(product, 4, variant).unwrap();
              cart.add_to_cart(product, 9, variant).unwrap(); // clamps
            }
          }
          cart.total_price()
        },
        BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_cart_reload(c: &mut Criterion) {
  let mut group = c.benchmark_group("CartReload");

  for num_products in [10usize, 100].iter() {
    let store = Arc::new(MemoryStore::new());
    let mut cart = Cart::empty(store.clone());
    for idx in 0..*num_products {
      cart.add_to_cart(&bench_product(idx), 2, "medium").unwrap();
    }
    group.bench_with_input(BenchmarkId::from_parameter(num_products), &store, |b, store| {
      b.iter(|| Cart::load(store.clone()).len());
    });
  }
  group.finish();
}

fn bench_cart_remove(c: &mut Criterion) {
  let store = Arc::new(MemoryStore::new());
  let products: Vec<Product> = (0..20).map(bench_product).collect();
  c.bench_function("CartRemoveMiddleLine", |b| {
    b.iter_batched(
      || {
        let mut cart = Cart::empty(store.clone());
        for product in &products {
          cart.add_to_cart(product, 1, "small").unwrap();
        }
        cart
      },
      |mut cart| cart.remove_from_cart(&LineKey::new("burger_10", "small")).unwrap(),
      BatchSize::SmallInput,
    );
  });
}

// --- Flow ---

fn bench_flow_sync_handlers(c: &mut Criterion) {
  let mut group = c.benchmark_group("FlowSyncHandlers");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 5, 10].iter() {
    let names: Vec<String> = (0..*num_steps).map(|i| format!("step_{}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut flow = Flow::<BenchContext, FlowError>::with_steps("bench", &name_refs);
    for name in &names {
      flow.on(name, |state: FlowState<BenchContext>| {
        state.write().counter += 1;
        std::future::ready(Ok::<_, FlowError>(StepControl::Continue))
      });
    }
    let flow = Arc::new(flow);

    group.throughput(Throughput::Elements(*num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), num_steps, |b, _| {
      b.to_async(&rt).iter_batched(
        || FlowState::new(BenchContext::default()),
        |state| {
          let flow = flow.clone();
          async move { flow.run(state).await.unwrap() }
        },
        BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_cart_add_and_merge,
  bench_cart_reload,
  bench_cart_remove,
  bench_flow_sync_handlers
);
criterion_main!(benches);
