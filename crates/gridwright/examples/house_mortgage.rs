//! Example: a house mortgage model written as live formulas
//!
//! ```text
//! cargo run --example house_mortgage -- /tmp/mortgage.xlsx
//! ```

use gridwright::prelude::*;
use gridwright::Result;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/house_mortgage.xlsx".to_string());

    // Inputs
    let price = Value::new(450_000.0)
        .named("House price")
        .unit("$")
        .number_format("#,##0")
        .parameter();
    let down = Value::new(0.2)
        .named("Down payment")
        .unit("%")
        .number_format("0%")
        .parameter();
    let rate = Value::new(0.045)
        .named("Annual rate")
        .unit("%")
        .number_format("0.00%")
        .parameter();
    let years = Value::new(30).named("Term").unit("years").parameter();

    // Derived figures
    let loan = (&price - &price * &down)
        .named("Loan")
        .unit("$")
        .number_format("#,##0");
    let monthly_rate = (&rate / 12).named("Monthly rate").number_format("0.000%");
    let payments = (&years * 12).named("Payments");
    let payment = (-functions::pmt(&monthly_rate, &payments, &loan))
        .named("Monthly payment")
        .unit("$")
        .number_format("#,##0.00");

    // First year of the amortization schedule; each month starts from the
    // previous month's closing balance cell
    let money = "#,##0.00";
    let months = Series::from_values(1..=12).named("Month");
    let mut interest = Series::new().named("Interest").number_format(money);
    let mut principal = Series::new().named("Principal").number_format(money);
    let mut balance = Series::new().named("Balance").number_format(money);

    let mut opening = loan.clone();
    for _ in 0..12 {
        let paid_interest = interest.push(&opening * &monthly_rate).clone();
        let paid_principal = principal.push(&payment - &paid_interest).clone();
        opening = balance.push(&opening - &paid_principal).clone();
    }
    let total_interest = interest.sum()?.named("Interest, year 1").number_format(money);

    let schedule = Table::titled("Amortization, year 1")
        .with_column(months)?
        .with_column(interest)?
        .with_column(principal)?
        .with_column(balance)?;

    let summary = ParameterTable::titled("Loan")
        .with(&loan)
        .with(&monthly_rate)
        .with(&payments)
        .with(&payment);

    let inputs = ParameterTable::titled("Inputs")
        .with(&price)
        .with(&down)
        .with(&rate)
        .with(&years);

    let mut layout = Layout::new();
    layout.add_sheet(SheetLayout::new("Inputs").with(inputs, 0, 0))?;
    layout.add_sheet(
        SheetLayout::new("Mortgage").with(
            Stack::vertical()
                .spacing(2)
                .child(summary)
                .child(schedule)
                .child(total_interest),
            0,
            0,
        ),
    )?;

    let report = layout.save(&path)?;
    println!(
        "Wrote {}: {} sheets, {} cells ({} formulas), {} formats",
        path, report.sheets, report.cells, report.formulas, report.formats
    );

    Ok(())
}
