use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{DateTime, Duration, TimeZone, Utc};
use invoicedesk_invoicing::{
    FilterCriteria, Invoice, InvoiceDraft, InvoiceId, InvoiceSummary, LineItem, PaymentStatus,
    filter_invoices,
};

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn build_invoices(n: usize) -> Vec<Invoice> {
    (0..n)
        .map(|i| {
            let date = base_date() + Duration::days((i % 365) as i64);
            let draft = InvoiceDraft {
                invoice_number: format!("INV-{i:06}"),
                date,
                customer_name: format!("Customer {}", i % 97),
                customer_email: format!("c{}@example.test", i % 97),
                customer_address: "1 Main St".to_string(),
                line_items: vec![
                    LineItem::new("Service", (i % 7) as f64, 120.0),
                    LineItem::new("Materials", 3.0, 19.99),
                ],
                subtotal: 0.0,
                tax: 12.5,
                total: 0.0,
                payment_status: PaymentStatus::ALL[i % 4],
            }
            .compute_totals();
            Invoice::from_draft(InvoiceId::new(), draft, date)
        })
        .collect()
}

/// The filter runs on every list refresh; it should stay linear.
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_invoices");

    for size in [100usize, 1_000, 10_000] {
        let invoices = build_invoices(size);
        let criteria = FilterCriteria::new()
            .with_date_range(
                Some(base_date() + Duration::days(30)),
                Some(base_date() + Duration::days(200)),
            )
            .with_statuses([PaymentStatus::Unpaid, PaymentStatus::Overdue])
            .with_search("customer 1");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("combined", size), &invoices, |b, invoices| {
            b.iter(|| filter_invoices(black_box(invoices), black_box(&criteria)).len())
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let invoices = build_invoices(10_000);
    c.bench_function("summary_10k", |b| {
        b.iter(|| InvoiceSummary::from_invoices(black_box(&invoices)))
    });
}

criterion_group!(benches, bench_filter, bench_summary);
criterion_main!(benches);
