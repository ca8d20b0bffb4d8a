//! Rule requiring a kebab-case `singular` label on resources.

use aep_lint_core::utils::resource::{get_resource, has_resource, resource_location};
use aep_lint_core::{Node, NodeKind, Problem, RuleDescriptor, RuleName};

use super::label_problem;

/// Rule name for resource-singular.
pub const NAME: RuleName = RuleName::new(123, "resource-singular");

pub(crate) fn rule() -> RuleDescriptor {
    RuleDescriptor::new(NAME, NodeKind::Message, check)
        .only_if(has_resource)
        .description("Resources declare a kebab-case singular")
}

fn check(message: Node<'_>) -> Vec<Problem> {
    let Some(resource) = get_resource(message) else {
        return vec![];
    };
    label_problem(message, resource_location(message), "singular", &resource.singular)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{book, conforming, conforming_with, messages, run};
    use serde_json::json;

    #[test]
    fn accepts_kebab_singular() {
        assert!(run(rule(), &book(conforming())).is_empty());
        assert!(run(rule(), &book(conforming_with("singular", json!("book-shelf")))).is_empty());
    }

    #[test]
    fn reports_missing_singular() {
        let mut resource = conforming();
        resource.as_object_mut().unwrap().remove("singular");
        let findings = run(rule(), &book(resource));
        assert_eq!(messages(&findings), vec!["Resources must declare `singular`."]);
    }

    #[test]
    fn reports_camel_singular() {
        let findings = run(rule(), &book(conforming_with("singular", json!("bookShelf"))));
        assert_eq!(messages(&findings), vec!["Resource singular must be kebab-case: \"bookShelf\""]);
        assert_eq!(
            findings[0].problem.suggestion.as_ref().unwrap().message,
            "use \"book-shelf\""
        );
    }
}
