// src/schema/fallback.rs

//! Placeholder records served when neither the network nor the cache can
//! provide a dataset. Practices and industries have none.

use super::types::{Dataset, Record};

fn record(fields: &[(&str, &str)]) -> Record {
    fields.iter().copied().collect()
}

fn team_member(name: &str, role: &str, bio: &str) -> Record {
    record(&[
        ("name", name),
        ("role", role),
        ("department", "exec"),
        ("photo", ""),
        ("linkedin", ""),
        ("bio", bio),
    ])
}

#[allow(clippy::too_many_arguments)]
fn training(
    title: &str,
    category: &str,
    description: &str,
    duration: &str,
    format: &str,
    badge: &str,
    featured: bool,
    next_session: &str,
) -> Record {
    record(&[
        ("title", title),
        ("category", category),
        ("description", description),
        ("duration", duration),
        ("format", format),
        ("price", "Contact Us"),
        ("priceNote", ""),
        ("image", ""),
        ("badge", badge),
        ("featured", if featured { "true" } else { "false" }),
        ("nextSession", next_session),
    ])
}

fn job(title: &str, department: &str, description: &str, requirements: &str) -> Record {
    record(&[
        ("title", title),
        ("department", department),
        ("location", "Dubai, UAE"),
        ("type", "Full-time"),
        ("description", description),
        ("requirements", requirements),
        ("applyLink", ""),
    ])
}

/// Static placeholder content for `ds`; empty when none is defined.
pub fn demo_records(ds: Dataset) -> Vec<Record> {
    match ds {
        Dataset::Team => vec![
            team_member(
                "Husain Feroz Ali",
                "CEO & Founder",
                "Fellow of the Society of Actuaries (FSA), USA, with over 20 years of experience in the actuarial field.",
            ),
            team_member("Piyush Goel", "Actuarial Director", ""),
            team_member("Rameez Ali", "Associate Director", ""),
        ],
        Dataset::Webinars => vec![record(&[
            ("title", "Demo Webinar (Google Sheets not connected)"),
            ("date", "2026-01-01"),
            ("time", "2:00 PM GMT"),
            ("speakers", "Demo Speaker (Test Role)"),
            (
                "description",
                "This is demo data. If you see this, Google Sheets is not properly connected. Check sharing settings.",
            ),
            ("status", "upcoming"),
            ("registerLink", "#"),
            ("recordingLink", ""),
        ])],
        Dataset::Training => vec![
            training(
                "AI for Business Professionals",
                "ai",
                "Learn how to leverage artificial intelligence to transform business operations, improve decision-making, and drive innovation.",
                "3 Days",
                "In-person & Online",
                "new",
                true,
                "March 2026",
            ),
            training(
                "Power BI Masterclass",
                "powerbi",
                "Master Microsoft Power BI from fundamentals to advanced visualizations. Create compelling dashboards and reports.",
                "2 Days",
                "Online",
                "popular",
                false,
                "Flexible",
            ),
            training(
                "IFRS 17 Implementation",
                "ifrs17",
                "Comprehensive training on IFRS 17 insurance contracts standard implementation, reporting, and compliance.",
                "5 Days",
                "In-person",
                "",
                false,
                "April 2026",
            ),
            training(
                "Actuarial Foundations",
                "actuarial",
                "Build a strong foundation in actuarial science covering life, health, and general insurance principles.",
                "4 Days",
                "In-person & Online",
                "",
                false,
                "Ongoing",
            ),
            training(
                "Risk Management Essentials",
                "risk",
                "Learn enterprise risk management frameworks, risk assessment methodologies, and regulatory compliance.",
                "3 Days",
                "Online",
                "",
                false,
                "Flexible",
            ),
            training(
                "Leadership Development",
                "leadership",
                "Develop essential leadership skills for the modern workplace including communication, strategy, and team management.",
                "2 Days",
                "In-person",
                "",
                false,
                "Quarterly",
            ),
        ],
        Dataset::Trainers => vec![record(&[
            ("name", "Expert Trainer"),
            ("title", "AI Training Specialist"),
            ("photo", ""),
            (
                "bio",
                "Experienced AI practitioner with expertise in machine learning, natural language processing, and business applications of AI.",
            ),
        ])],
        Dataset::Jobs => vec![
            job(
                "Senior Actuarial Analyst",
                "Actuarial",
                "Join our actuarial team to work on cutting-edge insurance projects across the GCC region.",
                "FSA/ASA qualification or near-qualified, 3+ years experience, strong Excel and Python skills",
            ),
            job(
                "Data Scientist",
                "Technology",
                "Lead data science initiatives and develop predictive models for insurance applications.",
                "Masters in Data Science or related field, 2+ years experience, Python, R, ML frameworks",
            ),
        ],
        Dataset::Practices | Dataset::Industries => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_placeholder_row_matches_the_sheet_columns() {
        for ds in Dataset::ALL {
            let expected = crate::schema::expected_keys(ds);
            for rec in demo_records(ds) {
                for key in rec.keys() {
                    assert!(
                        expected.iter().any(|k| k == key),
                        "{} placeholder has unknown key {}",
                        ds,
                        key
                    );
                }
            }
        }
    }

    #[test]
    fn practices_and_industries_have_no_placeholders() {
        assert!(demo_records(Dataset::Practices).is_empty());
        assert!(demo_records(Dataset::Industries).is_empty());
        assert_eq!(demo_records(Dataset::Jobs).len(), 2);
    }
}
