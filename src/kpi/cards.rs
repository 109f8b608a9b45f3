//! Card builders, one per workspace.

use crate::kpi::format::{fmt_money, fmt_percent, round1, trend_percent};
use crate::kpi::source::{
    AssetsFigures, FinanceFigures, InventoryFigures, ManufacturingFigures, PeopleFigures,
    ProjectsFigures, PurchasingFigures, QualityFigures, SalesFigures,
};
use crate::kpi::{KpiCard, Trend, Variant};

/// Warning when anything is pending, no variant otherwise.
fn warn_if_pending(count: u64) -> Option<Variant> {
    (count > 0).then_some(Variant::Warning)
}

fn error_if_any(count: u64) -> Option<Variant> {
    (count > 0).then_some(Variant::Error)
}

pub fn finance(f: &FinanceFigures) -> Vec<KpiCard> {
    let trend = trend_percent(f.revenue_this_month, f.revenue_last_month);
    let profit = f.revenue_this_month - f.expenses_this_month;
    vec![
        KpiCard::new("Total Revenue", fmt_money(f.revenue_this_month, &f.currency), "trending-up")
            .with_trend(Trend::from_delta(trend), Some(trend))
            .with_variant(Some(Variant::Success)),
        KpiCard::new("Total Expenses", fmt_money(f.expenses_this_month, &f.currency), "trending-down")
            .with_variant(Some(Variant::Warning)),
        KpiCard::new("Net Profit", fmt_money(profit, &f.currency), "calculator")
            .with_trend(if profit > 0.0 { Trend::Up } else { Trend::Down }, None)
            .with_variant(Some(if profit > 0.0 {
                Variant::Success
            } else {
                Variant::Error
            })),
        KpiCard::new("Outstanding Receivables", fmt_money(f.receivables, &f.currency), "file-text"),
        KpiCard::new("Outstanding Payables", fmt_money(f.payables, &f.currency), "file-text"),
    ]
}

pub fn sales(f: &SalesFigures) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Total Orders", f.orders_this_month.to_string(), "shopping-cart"),
        KpiCard::new("Revenue This Month", fmt_money(f.revenue_this_month, &f.currency), "trending-up")
            .with_variant(Some(Variant::Success)),
        KpiCard::new("Active Customers", f.active_customers.to_string(), "users"),
        KpiCard::new("Pending Deliveries", f.pending_deliveries.to_string(), "truck")
            .with_variant(warn_if_pending(f.pending_deliveries)),
    ]
}

pub fn purchasing(f: &PurchasingFigures) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Purchase Orders", f.orders_this_month.to_string(), "file-text"),
        KpiCard::new("Pending Receipts", f.pending_receipts.to_string(), "package")
            .with_variant(warn_if_pending(f.pending_receipts)),
        KpiCard::new("Active Suppliers", f.active_suppliers.to_string(), "users"),
        KpiCard::new("This Month Spend", fmt_money(f.spend_this_month, &f.currency), "calculator"),
    ]
}

pub fn inventory(f: &InventoryFigures) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Total Stock Value", fmt_money(f.stock_value, &f.currency), "package"),
        KpiCard::new("Low Stock Items", f.low_stock_items.to_string(), "alert-triangle")
            .with_variant(error_if_any(f.low_stock_items)),
        KpiCard::new("Pending Transfers", f.pending_transfers.to_string(), "truck"),
        KpiCard::new("Warehouses", f.warehouses.to_string(), "home"),
    ]
}

pub fn people(f: &PeopleFigures) -> Vec<KpiCard> {
    let mut cards = vec![
        KpiCard::new("Total Employees", f.total_employees.to_string(), "users"),
        KpiCard::new("Present Today", f.present_today.to_string(), "check-circle")
            .with_variant(Some(Variant::Success)),
        KpiCard::new("On Leave", f.on_leave.to_string(), "alert-circle")
            .with_variant(warn_if_pending(f.on_leave)),
    ];
    if let Some(openings) = f.open_positions {
        cards.push(KpiCard::new("Open Positions", openings.to_string(), "briefcase"));
    }
    cards
}

pub fn manufacturing(f: &ManufacturingFigures) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Active Work Orders", f.active_work_orders.to_string(), "settings"),
        KpiCard::new("Completed This Month", f.completed_this_month.to_string(), "check-circle")
            .with_variant(Some(Variant::Success)),
        KpiCard::new("Overdue", f.overdue.to_string(), "alert-triangle")
            .with_variant(error_if_any(f.overdue)),
    ]
}

pub fn projects(f: &ProjectsFigures) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Active Projects", f.active_projects.to_string(), "folder"),
        KpiCard::new("Overdue Tasks", f.overdue_tasks.to_string(), "alert-triangle")
            .with_variant(error_if_any(f.overdue_tasks)),
        KpiCard::new("Tasks Completed", f.tasks_completed.to_string(), "check-circle")
            .with_variant(Some(Variant::Success)),
    ]
}

pub fn quality(f: &QualityFigures) -> Vec<KpiCard> {
    let mut cards = Vec::new();
    if let Some(inspections) = &f.inspections {
        cards.push(KpiCard::new(
            "Inspections This Month",
            inspections.total.to_string(),
            "check-circle",
        ));
        cards.push(
            KpiCard::new("Passed", inspections.passed.to_string(), "check")
                .with_variant(Some(Variant::Success)),
        );
        cards.push(
            KpiCard::new("Failed", inspections.failed.to_string(), "x")
                .with_variant(error_if_any(inspections.failed)),
        );
        if inspections.total > 0 {
            let rate = round1(inspections.passed as f64 / inspections.total as f64 * 100.0);
            cards.push(
                KpiCard::new("Pass Rate", fmt_percent(rate), "percent")
                    .with_variant(Some(pass_rate_variant(rate))),
            );
        }
    }
    if let Some(open) = f.open_ncrs {
        cards.push(
            KpiCard::new("Open NCRs", open.to_string(), "alert-triangle")
                .with_variant(warn_if_pending(open)),
        );
    }
    cards
}

pub fn pass_rate_variant(rate: f64) -> Variant {
    if rate >= 90.0 {
        Variant::Success
    } else if rate >= 70.0 {
        Variant::Warning
    } else {
        Variant::Error
    }
}

pub fn assets(f: &AssetsFigures) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Total Assets", f.total_assets.to_string(), "briefcase"),
        KpiCard::new("Total Value", fmt_money(f.total_value, &f.currency), "calculator"),
        KpiCard::new("Pending Repairs", f.pending_repairs.to_string(), "settings")
            .with_variant(warn_if_pending(f.pending_repairs)),
    ]
}
