//! Issuer TSP screens.

use crate::components::ScreenFrame;
use leptos::prelude::*;

#[component]
pub fn ChargebacksPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Issuer TSP"
            title="Chargebacks"
            description="Disputed transactions and their chargeback status."
        >
            <p class="empty-state">"No chargebacks to show."</p>
        </ScreenFrame>
    }
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Issuer TSP"
            title="Transactions"
            description="Tokenized transactions routed through the issuer TSP."
        >
            <p class="empty-state">"No transactions to show."</p>
        </ScreenFrame>
    }
}
