//! Token Manager screens.

use crate::components::ScreenFrame;
use leptos::prelude::*;

#[component]
pub fn RiskManagementPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Token Manager"
            title="Risk Management"
            description="Risk rules evaluated before a token is provisioned."
        >
            <p class="empty-state">"No rules defined."</p>
        </ScreenFrame>
    }
}

#[component]
pub fn StepUpPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Token Manager"
            title="Step Up"
            description="Additional verification methods offered to cardholders."
        >
            <p class="empty-state">"No step-up methods configured."</p>
        </ScreenFrame>
    }
}

#[component]
pub fn FraudTeamPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Token Manager"
            title="Fraud Team"
            description="Provisioning requests held for fraud review."
        >
            <p class="empty-state">"No requests awaiting review."</p>
        </ScreenFrame>
    }
}

#[component]
pub fn CallCenterPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Token Manager"
            title="Call Center"
            description="Token lookup and lifecycle actions for support agents."
        >
            <p class="empty-state">"Search for a token to get started."</p>
        </ScreenFrame>
    }
}
