use crate::error::Result;
use crate::models::{Expense, ExpenseCategory};

fn sample_expenses() -> Vec<Expense> {
    let rows: [(&str, f64, ExpenseCategory, &str); 6] = [
        ("Lunch at Joe's Pizza", 12.5, ExpenseCategory::Food, "2024-03-05"),
        ("Bus pass", 2.0, ExpenseCategory::Transportation, "2024-12-25"),
        ("Concert tickets", 148.0, ExpenseCategory::Entertainment, "2024-07-19T20:00:00"),
        ("Returned headphones", -89.99, ExpenseCategory::Other, "2024-01-01"),
        ("Groceries for the week", 1234.5, ExpenseCategory::Food, "2024-02-29"),
        ("Airport taxi", 54.25, ExpenseCategory::Transportation, "2024-11-03"),
    ];
    rows.into_iter()
        .zip(1..)
        .map(|((description, amount, category, date), id)| Expense {
            id,
            description: description.to_string(),
            amount,
            category,
            date: date.to_string(),
        })
        .collect()
}

pub fn run() -> Result<()> {
    super::browse::open(sample_expenses())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::ExpenseCard;

    #[test]
    fn sample_ids_are_unique_and_sequential() {
        let ids: Vec<i64> = sample_expenses().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn every_sample_renders() {
        for e in sample_expenses() {
            assert!(ExpenseCard::new(&e).render().is_ok(), "{} failed", e.id);
        }
    }
}
