//! Integration tests for the in-memory order store.
//!
//! These tests exercise the store through the `OrderStore` trait, including
//! concurrent access from many tasks.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use domain::{OrderInput, Product, total_cost};
use order_store::{InMemoryOrderStore, OrderId, OrderStore};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

mod scenarios {
    use super::*;

    #[tokio::test]
    async fn create_then_update_keeps_identity_and_date() {
        let store = InMemoryOrderStore::new();

        let created = store
            .create(OrderInput::with_products(vec![Product::new(
                1,
                "Test Product",
                dec("100.50"),
            )]))
            .await
            .unwrap();

        assert_eq!(created.id(), OrderId::new(1));
        assert_eq!(created.cost(), dec("100.50"));
        assert_eq!(created.product_count(), 1);

        let mut replacement = OrderInput::with_products(vec![Product::new(
            2,
            "Updated Product",
            dec("250.75"),
        )]);
        replacement.id = Some(OrderId::new(42));
        replacement.date = NaiveDate::from_ymd_opt(2001, 2, 3);
        replacement.cost = Some(dec("0.01"));

        let updated = store
            .update(created.id(), replacement)
            .await
            .unwrap()
            .expect("order exists");

        assert_eq!(updated.id(), OrderId::new(1));
        assert_eq!(updated.date(), created.date());
        assert_eq!(updated.cost(), dec("250.75"));
        assert_eq!(updated.products().len(), 1);
        assert_eq!(updated.products()[0].name, "Updated Product");

        assert_eq!(store.get_by_id(created.id()).await, Some(updated));
        assert!(store.get_by_id(OrderId::new(42)).await.is_none());
    }

    #[tokio::test]
    async fn list_after_create_create_delete_first() {
        let store = InMemoryOrderStore::new();
        assert!(store.list_all().await.is_empty());

        let first = store.create(OrderInput::default()).await.unwrap();
        let second = store
            .create(OrderInput::with_products(vec![Product::new(
                7,
                "Keep",
                dec("9.99"),
            )]))
            .await
            .unwrap();
        assert!(store.delete_by_id(first.id()).await);

        let orders = store.list_all().await;
        assert_eq!(orders, vec![second]);
    }

    #[tokio::test]
    async fn update_replaces_products_wholesale() {
        let store = InMemoryOrderStore::new();
        let created = store
            .create(OrderInput::with_products(vec![
                Product::new(1, "A", dec("1.00")),
                Product::new(2, "B", dec("2.00")),
                Product::new(3, "C", dec("3.00")),
            ]))
            .await
            .unwrap();
        assert_eq!(created.cost(), dec("6.00"));

        let updated = store
            .update(created.id(), OrderInput::default())
            .await
            .unwrap()
            .unwrap();

        assert!(updated.products().is_empty());
        assert_eq!(updated.cost(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn product_order_is_preserved() {
        let store = InMemoryOrderStore::new();
        let names = ["zeta", "alpha", "mid"];
        let created = store
            .create(OrderInput::with_products(
                names
                    .iter()
                    .map(|n| Product::new(1, *n, Decimal::ONE))
                    .collect(),
            ))
            .await
            .unwrap();

        let stored = store.get_by_id(created.id()).await.unwrap();
        let stored_names: Vec<_> = stored.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(stored_names, names);
    }
}

mod concurrency {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_creates_issue_distinct_sequential_ids() {
        const N: u64 = 200;
        let store = InMemoryOrderStore::new();

        let handles: Vec<_> = (0..N)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(OrderInput::with_products(vec![Product::new(
                            i as i64,
                            format!("p{i}"),
                            Decimal::ONE,
                        )]))
                        .await
                        .unwrap()
                        .id()
                })
            })
            .collect();

        let mut ids = BTreeSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().as_u64());
        }

        let expected: BTreeSet<u64> = (1..=N).collect();
        assert_eq!(ids, expected);
        assert_eq!(store.last_issued_id().await, Some(OrderId::new(N)));
        assert_eq!(store.len().await, N as usize);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_respect_starting_offset() {
        let store = InMemoryOrderStore::starting_after(1000);

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create(OrderInput::default()).await.unwrap().id() })
            })
            .collect();

        let mut ids = BTreeSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().as_u64());
        }

        assert_eq!(ids, (1001..=1050).collect::<BTreeSet<u64>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn readers_never_see_half_written_orders() {
        let store = InMemoryOrderStore::new();
        let id = store.create(OrderInput::default()).await.unwrap().id();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 1..=200i64 {
                    let products = (0..(i % 5 + 1))
                        .map(|j| Product::new(j, format!("p{j}"), Decimal::new(i * 100 + j, 2)))
                        .collect();
                    store
                        .update(id, OrderInput::with_products(products))
                        .await
                        .unwrap()
                        .unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    for _ in 0..200 {
                        let order = store.get_by_id(id).await.unwrap();
                        assert_eq!(order.cost(), total_cost(order.products()).unwrap());
                        for order in store.list_all().await {
                            assert_eq!(order.cost(), total_cost(order.products()).unwrap());
                        }
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_deletes_remove_exactly_once() {
        let store = InMemoryOrderStore::new();
        let id = store.create(OrderInput::default()).await.unwrap().id();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.delete_by_id(id).await })
            })
            .collect();

        let mut removed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                removed += 1;
            }
        }

        assert_eq!(removed, 1);
        assert!(store.get_by_id(id).await.is_none());
    }
}
