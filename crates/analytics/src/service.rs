//! Aggregation driver: joins sales totals with ledger-derived availability
//! and shrinkage, then classifies and ranks items.

use std::collections::HashMap;
use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, info};

use stocklens_core::{round2, round3, AnalyticsError, AnalyticsResult, ItemCode};

use crate::abc::{classify_in_order, AbcOrder};
use crate::datetime::DATE_FORMAT;
use crate::model::{
    AnalyticsResponse, ItemAnalytics, ItemAnalyticsRequest, LedgerRecord, SalesRecord,
    UNGROUPED_LABEL,
};
use crate::osa::on_shelf_availability;
use crate::pool::WorkerPool;
use crate::source::DatasetSource;
use crate::window::ReportWindow;

/// Engine configuration, passed explicitly at construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Worker threads used to process ledger chunks (>= 1).
    pub workers: usize,
    /// Walk order for ABC classification.
    pub abc_order: AbcOrder,
}

impl Default for AnalyticsConfig {
    /// Host parallelism (at least 2 workers), as-enumerated ABC order.
    fn default() -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            workers: cores.max(2),
            abc_order: AbcOrder::default(),
        }
    }
}

impl AnalyticsConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_abc_order(mut self, abc_order: AbcOrder) -> Self {
        self.abc_order = abc_order;
        self
    }
}

/// Per-item sales totals, in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
struct SalesTotals {
    amount: f64,
    quantity: f64,
    name: String,
}

impl SalesTotals {
    /// Average sale price, `0` when nothing was sold by quantity.
    fn average_price(&self) -> f64 {
        if self.quantity > 0.0 {
            self.amount / self.quantity
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyticsService {
    config: AnalyticsConfig,
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

impl AnalyticsService {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            config: config.with_workers(config.workers),
        }
    }

    pub fn config(&self) -> AnalyticsConfig {
        self.config
    }

    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Change the worker count. Zero or negative values are ignored.
    pub fn set_workers(&mut self, workers: i64) {
        if workers > 0 {
            self.config.workers = usize::try_from(workers).unwrap_or(usize::MAX);
        }
    }

    /// Load both collections from `source` and compute the report.
    ///
    /// Window dates are validated before anything is loaded.
    pub fn get_item_analytics(
        &self,
        request: &ItemAnalyticsRequest,
        source: &dyn DatasetSource,
    ) -> AnalyticsResult<AnalyticsResponse> {
        let window = ReportWindow::parse(&request.start_date, &request.finish_date)?;

        let ledger = source
            .load_ledger()
            .map_err(|e| AnalyticsError::upstream_load("stock data", e))?;
        let sales = source
            .load_sales()
            .map_err(|e| AnalyticsError::upstream_load("sales data", e))?;

        info!(
            stock_records = ledger.len(),
            sales_records = sales.len(),
            "loaded analytics inputs"
        );

        let items = self.compute_for_window(&ledger, &sales, &window);
        Ok(AnalyticsResponse::new(items))
    }

    /// Compute per-item analytics for the calendar window `start..=finish`
    /// (`dd.mm.yyyy` dates).
    pub fn compute_analytics(
        &self,
        ledger: &[LedgerRecord],
        sales: &[SalesRecord],
        start: &str,
        finish: &str,
    ) -> AnalyticsResult<Vec<ItemAnalytics>> {
        let window = ReportWindow::parse(start, finish)?;
        Ok(self.compute_for_window(ledger, sales, &window))
    }

    /// Compute per-item analytics over an already validated window.
    ///
    /// Only items present in `sales` are reported. The list comes back
    /// sorted by sales amount, largest first.
    pub fn compute_for_window(
        &self,
        ledger: &[LedgerRecord],
        sales: &[SalesRecord],
        window: &ReportWindow,
    ) -> Vec<ItemAnalytics> {
        let started = Instant::now();
        info!(
            start = %window.start().format(DATE_FORMAT),
            end = %window.end().format(DATE_FORMAT),
            workers = self.config.workers,
            "computing item analytics"
        );

        let mut merged = WorkerPool::new(self.config.workers).run(ledger);
        let totals = aggregate_sales(sales);
        let groups = group_lookup(ledger);

        let mut items: Vec<ItemAnalytics> = Vec::with_capacity(totals.len());
        for (code, totals) in totals {
            let loss_amount = merged.loss_quantity(&code) * totals.average_price();
            let loss_percent = if totals.amount > 0.0 {
                loss_amount / totals.amount * 100.0
            } else {
                0.0
            };
            let osa = merged
                .events
                .get_mut(&code)
                .map(|events| on_shelf_availability(events, window))
                .unwrap_or(0.0);

            let name = if totals.name.is_empty() {
                code.to_string()
            } else {
                totals.name
            };
            let group = match groups.get(&code) {
                Some(g) if !g.is_empty() => (*g).to_string(),
                _ => UNGROUPED_LABEL.to_string(),
            };

            items.push(ItemAnalytics {
                name,
                code,
                group,
                sales: round2(totals.amount),
                loss: round2(loss_amount),
                loss_of_profit: round3(loss_percent),
                osa,
                abc: None,
            });
        }

        classify_in_order(&mut items, self.config.abc_order);
        items.sort_by(|a, b| b.sales.total_cmp(&a.sales));

        info!(
            items = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "item analytics completed"
        );
        items
    }
}

/// Sum amount and quantity per trimmed code; the first name seen wins.
fn aggregate_sales(sales: &[SalesRecord]) -> IndexMap<ItemCode, SalesTotals> {
    let mut totals: IndexMap<ItemCode, SalesTotals> = IndexMap::new();
    for record in sales {
        let Some(code) = ItemCode::parse(&record.code) else {
            continue;
        };
        let entry = totals.entry(code).or_insert_with(|| SalesTotals {
            name: record.name.clone(),
            ..SalesTotals::default()
        });
        entry.amount += record.amount;
        entry.quantity += record.quantity;
    }
    debug!(items = totals.len(), "aggregated sales");
    totals
}

/// Parent group per code; later ledger records overwrite earlier ones.
fn group_lookup(ledger: &[LedgerRecord]) -> HashMap<ItemCode, &str> {
    let mut groups = HashMap::new();
    for record in ledger {
        if let Some(code) = ItemCode::parse(&record.code) {
            groups.insert(code, record.group.as_str());
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AbcClass, SHRINKAGE_MARKER};
    use crate::source::{InMemoryDataset, SourceError};
    use proptest::prelude::*;
    use stocklens_core::DateField;

    fn stock(code: &str, group: &str, period: &str, opening: f64, closing: f64) -> LedgerRecord {
        LedgerRecord {
            code: code.to_string(),
            group: group.to_string(),
            period: period.to_string(),
            opening,
            closing,
            expense_category: None,
        }
    }

    fn shrink(code: &str, period: &str, opening: f64, closing: f64) -> LedgerRecord {
        LedgerRecord {
            expense_category: Some(SHRINKAGE_MARKER.to_string()),
            ..stock(code, "Group", period, opening, closing)
        }
    }

    fn sale(code: &str, name: &str, quantity: f64, amount: f64) -> SalesRecord {
        SalesRecord {
            code: code.to_string(),
            name: name.to_string(),
            quantity,
            amount,
        }
    }

    fn service(workers: usize) -> AnalyticsService {
        AnalyticsService::new(AnalyticsConfig::default().with_workers(workers))
    }

    struct FailingSource {
        fail_ledger: bool,
    }

    impl DatasetSource for FailingSource {
        fn load_ledger(&self) -> Result<Vec<LedgerRecord>, SourceError> {
            if self.fail_ledger {
                Err(SourceError::Unavailable("stock_dump.json not found".to_string()))
            } else {
                Ok(Vec::new())
            }
        }

        fn load_sales(&self) -> Result<Vec<SalesRecord>, SourceError> {
            Err(SourceError::Malformed("expected array".to_string()))
        }
    }

    #[test]
    fn default_config_has_at_least_two_workers() {
        assert!(AnalyticsService::default().workers() >= 2);
    }

    #[test]
    fn set_workers_ignores_non_positive_values() {
        let mut svc = service(2);
        svc.set_workers(8);
        assert_eq!(svc.workers(), 8);
        svc.set_workers(0);
        assert_eq!(svc.workers(), 8);
        svc.set_workers(-3);
        assert_eq!(svc.workers(), 8);
    }

    #[test]
    fn single_item_end_to_end() {
        let ledger = vec![stock("1001", "", "01.01.2024 00:00:00", 10.0, 8.0)];
        let sales = vec![sale("1001", "Widget", 5.0, 500.0)];

        let items = service(4)
            .compute_analytics(&ledger, &sales, "01.01.2024", "31.01.2024")
            .unwrap();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.code.as_str(), "1001");
        assert_eq!(item.name, "Widget");
        assert_eq!(item.sales, 500.0);
        assert_eq!(item.group, UNGROUPED_LABEL);
        assert_eq!(item.loss, 0.0);
        assert_eq!(item.loss_of_profit, 0.0);
        // Event at window start leaves 8 on the shelf for the whole window.
        assert_eq!(item.osa, 100.0);
        assert_eq!(item.abc, Some(AbcClass::C));
    }

    #[test]
    fn shrinkage_is_valued_at_average_price() {
        let ledger = vec![
            shrink("1001", "05.01.2024 10:00", 10.0, 7.0),
            shrink("1001", "06.01.2024 10:00", 7.0, 9.0),
        ];
        // Average price 1000 / 4 = 250; 3 units lost = 750, i.e. 75% of sales.
        let sales = vec![sale("1001", "Milk", 1.0, 40.0), sale(" 1001 ", "Milk", 3.0, 960.0)];
        let sales_total = 1000.0;
        let items = service(2)
            .compute_analytics(&ledger, &sales, "01.01.2024", "31.01.2024")
            .unwrap();

        assert_eq!(items[0].sales, sales_total);
        assert_eq!(items[0].loss, 750.0);
        assert_eq!(items[0].loss_of_profit, 75.0);
        assert_eq!(items[0].group, "Group");
    }

    #[test]
    fn zero_quantity_means_zero_loss_amount() {
        let ledger = vec![shrink("9", "01.01.2024", 10.0, 0.0)];
        let sales = vec![sale("9", "Returned", 0.0, 120.0)];
        let items = service(2)
            .compute_analytics(&ledger, &sales, "01.01.2024", "02.01.2024")
            .unwrap();
        assert_eq!(items[0].loss, 0.0);
        assert_eq!(items[0].loss_of_profit, 0.0);
    }

    #[test]
    fn items_without_sales_are_excluded_and_fallbacks_apply() {
        let ledger = vec![
            stock("1", "Dairy", "01.01.2024", 1.0, 1.0),
            stock("2", "Bakery", "01.01.2024", 1.0, 1.0),
            stock("1", "Dairy & Eggs", "02.01.2024", 1.0, 1.0),
        ];
        let sales = vec![sale("1", "", 1.0, 10.0), sale("3", "Orphan", 1.0, 5.0), sale("  ", "Blank", 1.0, 99.0)];

        let items = service(2)
            .compute_analytics(&ledger, &sales, "01.01.2024", "31.01.2024")
            .unwrap();

        let codes: Vec<&str> = items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["1", "3"]);
        assert_eq!(items[0].name, "1");
        assert_eq!(items[0].group, "Dairy & Eggs");
        assert_eq!(items[1].group, UNGROUPED_LABEL);
        assert_eq!(items[1].osa, 0.0);
    }

    #[test]
    fn first_seen_sales_name_wins() {
        let sales = vec![sale("5", "Bread", 1.0, 2.0), sale("5", "Bread (sliced)", 1.0, 2.0)];
        let items = service(1)
            .compute_analytics(&[], &sales, "01.01.2024", "01.01.2024")
            .unwrap();
        assert_eq!(items[0].name, "Bread");
        assert_eq!(items[0].sales, 4.0);
    }

    #[test]
    fn result_is_sorted_by_sales_descending() {
        let sales = vec![
            sale("a", "a", 1.0, 100.0),
            sale("b", "b", 1.0, 1000.0),
            sale("c", "c", 1.0, 500.0),
            sale("d", "d", 1.0, 200.0),
        ];
        let items = service(2)
            .compute_analytics(&[], &sales, "01.01.2024", "31.01.2024")
            .unwrap();
        let amounts: Vec<f64> = items.iter().map(|i| i.sales).collect();
        assert_eq!(amounts, vec![1000.0, 500.0, 200.0, 100.0]);
    }

    #[test]
    fn abc_walks_sales_first_seen_order_by_default() {
        // Walk order a(100), b(1000), c(500), d(200): 5.6% A, 61.1% A, 88.9% B, 100% C.
        let sales = vec![
            sale("a", "a", 1.0, 100.0),
            sale("b", "b", 1.0, 1000.0),
            sale("c", "c", 1.0, 500.0),
            sale("d", "d", 1.0, 200.0),
        ];
        let items = service(2)
            .compute_analytics(&[], &sales, "01.01.2024", "31.01.2024")
            .unwrap();
        let labels: Vec<(&str, Option<AbcClass>)> =
            items.iter().map(|i| (i.code.as_str(), i.abc)).collect();
        assert_eq!(
            labels,
            vec![
                ("b", Some(AbcClass::A)),
                ("c", Some(AbcClass::B)),
                ("d", Some(AbcClass::C)),
                ("a", Some(AbcClass::A)),
            ]
        );
    }

    #[test]
    fn abc_can_walk_in_sales_order() {
        let sales = vec![
            sale("a", "a", 1.0, 100.0),
            sale("b", "b", 1.0, 1000.0),
            sale("c", "c", 1.0, 500.0),
            sale("d", "d", 1.0, 200.0),
        ];
        let svc = AnalyticsService::new(
            AnalyticsConfig::default()
                .with_workers(2)
                .with_abc_order(AbcOrder::SalesDescending),
        );
        let items = svc
            .compute_analytics(&[], &sales, "01.01.2024", "31.01.2024")
            .unwrap();
        let labels: Vec<Option<AbcClass>> = items.iter().map(|i| i.abc).collect();
        assert_eq!(
            labels,
            vec![Some(AbcClass::A), Some(AbcClass::B), Some(AbcClass::B), Some(AbcClass::C)]
        );
    }

    #[test]
    fn figures_are_rounded() {
        let ledger = vec![shrink("1", "01.01.2024", 1.0, 0.0)];
        let sales = vec![sale("1", "x", 3.0, 10.0)];
        let items = service(1)
            .compute_analytics(&ledger, &sales, "01.01.2024", "01.01.2024")
            .unwrap();
        // price 3.333.., loss 3.33, percent 33.333..
        assert_eq!(items[0].sales, 10.0);
        assert_eq!(items[0].loss, 3.33);
        assert_eq!(items[0].loss_of_profit, 33.333);
    }

    #[test]
    fn invalid_dates_fail_the_call() {
        let svc = service(2);
        let err = svc
            .compute_analytics(&[], &[], "invalid-date", "01.01.2024")
            .unwrap_err();
        assert_eq!(err, AnalyticsError::invalid_date(DateField::Start, "invalid-date"));

        let err = svc
            .compute_analytics(&[], &[], "01.01.2024", "invalid-date")
            .unwrap_err();
        assert_eq!(err, AnalyticsError::invalid_date(DateField::Finish, "invalid-date"));
    }

    #[test]
    fn dates_are_checked_before_loading() {
        let request = ItemAnalyticsRequest {
            token: "t".to_string(),
            start_date: "bad".to_string(),
            finish_date: "01.01.2024".to_string(),
        };
        let err = service(2)
            .get_item_analytics(&request, &FailingSource { fail_ledger: true })
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn upstream_failures_are_reported_with_context() {
        let request = ItemAnalyticsRequest {
            token: "t".to_string(),
            start_date: "01.01.2024".to_string(),
            finish_date: "31.01.2024".to_string(),
        };
        let err = service(2)
            .get_item_analytics(&request, &FailingSource { fail_ledger: true })
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to load stock data"));

        let err = service(2)
            .get_item_analytics(&request, &FailingSource { fail_ledger: false })
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to load sales data"));
    }

    #[test]
    fn response_total_matches_items() {
        let dataset = InMemoryDataset::new(
            vec![stock("1001", "Group 1", "01.01.2024 00:00:00", 10.0, 8.0)],
            vec![sale("1001", "Item 1", 5.0, 500.0)],
        );
        let request = ItemAnalyticsRequest {
            token: "t".to_string(),
            start_date: "01.01.2024".to_string(),
            finish_date: "31.01.2024".to_string(),
        };
        let response = service(2).get_item_analytics(&request, &dataset).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.items[0].group, "Group 1");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 32,
            ..ProptestConfig::default()
        })]

        /// Property: the report is identical (order and values) for any worker count.
        #[test]
        fn report_is_independent_of_worker_count(
            rows in prop::collection::vec((0u8..8, 1u32..31, 0u32..24, 0u16..40, 0u16..40, any::<bool>()), 0..150),
            sold in prop::collection::vec((0u8..10, 0u16..20, 0u32..10_000), 0..30),
            workers in 1usize..=64,
        ) {
            let ledger: Vec<LedgerRecord> = rows
                .iter()
                .map(|(c, day, hour, o, cl, s)| LedgerRecord {
                    code: format!(" {c} "),
                    group: format!("group {}", c % 3),
                    period: format!("{day:02}.01.2024 {hour:02}:00"),
                    opening: f64::from(*o),
                    closing: f64::from(*cl),
                    expense_category: s.then(|| SHRINKAGE_MARKER.to_string()),
                })
                .collect();
            let sales: Vec<SalesRecord> = sold
                .iter()
                .map(|(c, q, a)| sale(&format!("{c}"), "", f64::from(*q), f64::from(*a) / 4.0))
                .collect();

            let baseline = service(1)
                .compute_analytics(&ledger, &sales, "05.01.2024", "25.01.2024")
                .unwrap();
            let parallel = service(workers)
                .compute_analytics(&ledger, &sales, "05.01.2024", "25.01.2024")
                .unwrap();
            prop_assert_eq!(baseline, parallel);
        }
    }
}
