use crate::constants::SETTLE_TOLERANCE;
use crate::models::{Expense, Participant, SettlementResult, Transaction};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Round a currency value to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute consolidated balances and a minimal transaction list for a group.
///
/// The computation is pure: it touches nothing but its arguments and calling
/// it twice with the same inputs yields the same result. Stale references
/// degrade softly instead of erroring: an expense with an unknown payer
/// contributes nothing, an unknown id inside an involved list only drops its
/// own share (the payer keeps the surplus credit), and an empty participant
/// list short-circuits to the empty result.
pub fn calculate_settlement(participants: &[Participant], expenses: &[Expense]) -> SettlementResult {
    if participants.is_empty() {
        return SettlementResult::default();
    }

    let raw = accumulate_raw_balances(participants, expenses);
    let balances = consolidate_linked_payers(participants, &raw);
    let transactions = minimize_transactions(participants, &balances);

    SettlementResult { transactions, balances }
}

/// How much everyone paid versus how much they consumed, before any
/// linked-payer consolidation.
fn accumulate_raw_balances(participants: &[Participant], expenses: &[Expense]) -> HashMap<String, f64> {
    let mut balances: HashMap<String, f64> =
        participants.iter().map(|p| (p.id.clone(), 0.0)).collect();

    for expense in expenses {
        // Credit the payer. An expense whose payer is gone contributes
        // neither credit nor debit.
        match balances.get_mut(&expense.payer_id) {
            Some(credit) => *credit += expense.amount,
            None => {
                debug!("Expense {} has unknown payer {}, skipping", expense.id, expense.payer_id);
                continue;
            }
        }

        // Debit the consumers.
        let count = expense.involved_user_ids.len();
        if count == 0 {
            continue;
        }
        let share = expense.amount / count as f64;
        for user_id in &expense.involved_user_ids {
            if let Some(balance) = balances.get_mut(user_id) {
                *balance -= share;
            }
        }
    }

    balances
}

/// Transfer each dependent's raw balance onto its linked payer and zero the
/// dependent. Reads the pre-consolidation snapshot, so each dependent
/// contributes independently and processing order does not affect totals.
fn consolidate_linked_payers(
    participants: &[Participant],
    raw: &HashMap<String, f64>,
) -> HashMap<String, f64> {
    let mut consolidated = raw.clone();

    for participant in participants {
        let Some(payer_id) = &participant.linked_payer_id else {
            continue;
        };
        if *payer_id == participant.id {
            continue;
        }

        let dependent_balance = raw.get(&participant.id).copied().unwrap_or(0.0);
        // A stale payer id still gets an entry, keeping the totals zero-sum.
        *consolidated.entry(payer_id.clone()).or_insert(0.0) += dependent_balance;
        consolidated.insert(participant.id.clone(), 0.0);
    }

    consolidated
}

/// Greedy debt resolution: largest obligations first, two pointers, at most
/// `debtors + creditors - 1` transactions.
fn minimize_transactions(
    participants: &[Participant],
    balances: &HashMap<String, f64>,
) -> Vec<Transaction> {
    let mut debtors: Vec<(String, f64)> = Vec::new();
    let mut creditors: Vec<(String, f64)> = Vec::new();

    for id in settlement_order(participants, balances) {
        // Round to 2 decimal places to avoid floating point errors.
        let rounded = round2(balances.get(&id).copied().unwrap_or(0.0));
        if rounded < -SETTLE_TOLERANCE {
            debtors.push((id, rounded));
        } else if rounded > SETTLE_TOLERANCE {
            creditors.push((id, rounded));
        }
    }

    // Sort by magnitude, stable so equal balances keep roster order.
    debtors.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
    creditors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    let mut transactions = Vec::new();
    let mut i = 0; // creditor index
    let mut j = 0; // debtor index

    while i < creditors.len() && j < debtors.len() {
        // Settle the minimum of what's owed and what's receivable.
        let amount = creditors[i].1.min(-debtors[j].1);

        if amount > SETTLE_TOLERANCE {
            transactions.push(Transaction {
                from_id: debtors[j].0.clone(),
                to_id: creditors[i].0.clone(),
                amount: round2(amount),
            });
        }

        creditors[i].1 -= amount;
        debtors[j].1 += amount;

        if creditors[i].1.abs() < SETTLE_TOLERANCE {
            i += 1;
        }
        if debtors[j].1.abs() < SETTLE_TOLERANCE {
            j += 1;
        }
    }

    debug!(
        "Settled {} debtors and {} creditors in {} transactions",
        debtors.len(),
        creditors.len(),
        transactions.len()
    );
    transactions
}

/// Roster order first, then balances held by ids no longer on the roster
/// (stale link targets) in sorted order, so ties always break the same way.
fn settlement_order(participants: &[Participant], balances: &HashMap<String, f64>) -> Vec<String> {
    let known: HashSet<&str> = participants.iter().map(|p| p.id.as_str()).collect();
    let mut order: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();

    let mut extras: Vec<String> = balances
        .keys()
        .filter(|id| !known.contains(id.as_str()))
        .cloned()
        .collect();
    extras.sort();
    order.extend(extras);
    order
}
