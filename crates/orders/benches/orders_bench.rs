use common::Money;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orders::{DiscountAllocator, LineItemSnapshot, select_checkout_discount};

fn line_items(n: usize) -> Vec<LineItemSnapshot> {
    (0..n)
        .map(|i| {
            LineItemSnapshot::new(
                format!("SKU-{i:03}"),
                format!("Product {i}"),
                Money::from_cents(250 + (i as i64 % 7) * 100),
                1 + (i as u32 % 4),
            )
        })
        .collect()
}

fn bench_discount_selection(c: &mut Criterion) {
    let items = line_items(50);

    c.bench_function("tiered_volume_select", |b| {
        let allocator = DiscountAllocator::tiered_volume();
        b.iter(|| allocator.select(black_box(Money::from_dollars(150)), black_box(&items)))
    });

    c.bench_function("promo_then_tiered_fallback", |b| {
        b.iter(|| {
            select_checkout_discount(
                black_box(Money::from_dollars(150)),
                black_box(&items),
                black_box(Some("NOPE")),
            )
        })
    });
}

fn bench_pricing(c: &mut Criterion) {
    let items = line_items(100);

    c.bench_function("subtotal_and_discount_100_items", |b| {
        b.iter(|| {
            let subtotal: Money = items.iter().map(LineItemSnapshot::total_price).sum();
            let strategy = select_checkout_discount(subtotal, &items, None);
            let discount = strategy.evaluate(subtotal);
            black_box(subtotal.subtract_clamped(discount))
        })
    });
}

criterion_group!(benches, bench_discount_selection, bench_pricing);
criterion_main!(benches);
