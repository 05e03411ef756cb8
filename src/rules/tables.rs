//! Static foundational rules for the Wyoming small-claims docket
//!
//! Always available without retrieval. The corpus search supplements these
//! with case-specific statutory text.

use serde::Serialize;

/// One foundational rule entry
#[derive(Debug, Clone, Serialize)]
pub struct StaticRule {
    pub key: &'static str,
    pub rule: &'static str,
    pub statute: &'static str,
}

static STATIC_RULES: &[StaticRule] = &[
    StaticRule {
        key: "jurisdiction",
        rule: "Amount in controversy must not exceed $6,000, exclusive of interest and costs. \
            Wyoming Circuit Court, Small Claims Docket.",
        statute: "W.S. 1-21-201",
    },
    StaticRule {
        key: "burden_of_proof",
        rule: "Preponderance of the evidence: more likely than not (greater than 50%). The \
            plaintiff bears the burden.",
        statute: "W.S. 1-21-204(b)",
    },
    StaticRule {
        key: "evidence_rules",
        rule: "Formal rules of evidence do not apply. The court may consider any evidence it \
            deems reliable and relevant; documentary evidence is generally given more weight \
            than oral testimony alone.",
        statute: "W.S. 1-21-201(b)",
    },
    StaticRule {
        key: "damages",
        rule: "Damages must be proven with reasonable certainty; speculative damages are not \
            recoverable. Property: lesser of repair cost or diminution in value. Contract: \
            benefit of the bargain.",
        statute: "W.S. 1-1-109",
    },
    StaticRule {
        key: "service",
        rule: "Defendant must be served at least 10 days before the hearing, by personal \
            service, certified mail with return receipt, or other authorized means.",
        statute: "W.S. 1-21-203",
    },
    StaticRule {
        key: "security_deposit",
        rule: "Deposit must be returned within 30 days after lease termination, with an \
            itemized statement of any deductions.",
        statute: "W.S. 1-21-1208",
    },
    StaticRule {
        key: "counterclaims",
        rule: "Counterclaims are allowed but must not exceed the $6,000 jurisdictional limit.",
        statute: "W.S. 1-21-201(d)",
    },
];

/// Elements a claimant must establish for one claim type
#[derive(Debug, Clone)]
pub struct ClaimElementSet {
    pub key: &'static str,
    pub name: &'static str,
    pub elements: &'static [&'static str],
    pub damages_measure: &'static str,
}

static CLAIM_ELEMENTS: &[ClaimElementSet] = &[
    ClaimElementSet {
        key: "contract",
        name: "Breach of Contract",
        elements: &[
            "A valid contract existed (written or oral)",
            "Plaintiff performed their obligations (or was excused from performance)",
            "Defendant breached the contract",
            "Plaintiff suffered damages as a direct result of the breach",
        ],
        damages_measure: "Benefit of the bargain",
    },
    ClaimElementSet {
        key: "property_damage",
        name: "Property Damage (Negligence)",
        elements: &[
            "Defendant owed plaintiff a duty of care",
            "Defendant breached that duty",
            "The breach was the proximate cause of the damage",
            "Plaintiff suffered actual, quantifiable damages",
        ],
        damages_measure: "Lesser of repair cost or diminution in value",
    },
    ClaimElementSet {
        key: "security_deposit",
        name: "Security Deposit Return",
        elements: &[
            "Tenant paid a security deposit",
            "Lease terminated and tenant vacated the property",
            "Landlord failed to return deposit within 30 days OR failed to provide itemized deductions",
            "Deductions (if any) were unreasonable or unsupported",
        ],
        damages_measure: "Amount of deposit wrongfully withheld",
    },
    ClaimElementSet {
        key: "loan_debt",
        name: "Money Owed (Debt/Loan)",
        elements: &[
            "Defendant received money or goods from plaintiff",
            "An agreement to repay existed (express or implied)",
            "Defendant has failed to repay",
            "The amount claimed is accurate",
        ],
        damages_measure: "Principal amount owed plus any agreed interest",
    },
    ClaimElementSet {
        key: "consumer",
        name: "Consumer Dispute",
        elements: &[
            "A transaction occurred between the parties",
            "Goods or services were defective or not as represented",
            "Plaintiff notified defendant of the problem",
            "Defendant failed to remedy the situation",
            "Plaintiff suffered quantifiable damages",
        ],
        damages_measure: "Cost to remedy or difference in value",
    },
    ClaimElementSet {
        key: "other",
        name: "General Civil Claim",
        elements: &[
            "Defendant owed a duty or obligation to plaintiff",
            "Defendant breached that duty or obligation",
            "Plaintiff suffered damages as a result",
            "The amount of damages is proven",
        ],
        damages_measure: "Actual proven damages",
    },
];

pub fn static_rules() -> &'static [StaticRule] {
    STATIC_RULES
}

/// Checklist for a claim type. Unknown or unmapped types return the general
/// civil claim set; this lookup never fails.
pub fn claim_elements(case_type: &str) -> &'static ClaimElementSet {
    let key = case_type.trim().to_lowercase().replace(' ', "_");
    CLAIM_ELEMENTS
        .iter()
        .find(|set| set.key == key)
        .unwrap_or_else(|| {
            CLAIM_ELEMENTS
                .iter()
                .find(|set| set.key == "other")
                .expect("general claim set is always present")
        })
}
