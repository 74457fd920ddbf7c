use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use tempfile::tempdir;
use time::Duration;
use time::macros::datetime;
use tokio::runtime::Runtime;

use expense_tracker_server::database::init_db;
use expense_tracker_server::models::{Category, Expense, NewExpense};
use expense_tracker_server::service::{ExpenseService, summarize_expenses};
use expense_tracker_server::store::{ExpenseStore, LibsqlStore};

// Benchmark constants
const BENCH_EXPENSE_COUNT: usize = 1000;

fn bench_new_expense(i: usize) -> NewExpense {
    NewExpense {
        description: format!("Benchmark Expense {}", i),
        amount: 10.0 + (i % 100) as f64,
        category: Category::ALL[i % Category::ALL.len()],
        date: datetime!(2025-01-01 00:00 UTC) + Duration::minutes(i as i64),
    }
}

fn bench_expenses(count: usize) -> Vec<Expense> {
    (0..count)
        .map(|i| {
            let new = bench_new_expense(i);
            Expense {
                id: i.to_string(),
                description: new.description,
                amount: new.amount,
                category: new.category,
                date: new.date,
                created_at: new.date,
                updated_at: new.date,
            }
        })
        .collect()
}

fn summary_benchmarks(c: &mut Criterion) {
    let expenses = bench_expenses(BENCH_EXPENSE_COUNT);

    c.bench_function("summarize_1000_expenses", |b| {
        b.iter(|| summarize_expenses(black_box(&expenses)))
    });
}

fn store_benchmarks(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let temp_dir = tempdir().unwrap();
    let data_path = temp_dir.path().to_str().unwrap().to_string();

    let service = rt.block_on(async {
        let store = LibsqlStore::new(init_db(&data_path).await.unwrap());
        for i in 0..BENCH_EXPENSE_COUNT {
            store.insert(bench_new_expense(i)).await.unwrap();
        }
        ExpenseService::new(Arc::new(store))
    });

    c.bench_function("list_1000_expenses", |b| {
        b.to_async(&rt).iter(|| async { black_box(service.list().await.unwrap()) })
    });

    c.bench_function("summarize_1000_stored_expenses", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(service.summarize().await.unwrap()) })
    });
}

criterion_group!(benches, summary_benchmarks, store_benchmarks);
criterion_main!(benches);
