use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverPlugin, SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2015, day = 25, tags = ["macro-test", "count"])]
struct CountLines;

impl AocParser for CountLines {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for CountLines {
    const LABEL: &'static str = "Lines";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lines().count().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2015, day = 24)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("0".to_string())
    }
}

#[test]
fn test_plugin_submitted_with_tags() {
    let plugin = aoc_solver::inventory::iter::<SolverPlugin>()
        .find(|p| p.year == 2015 && p.day == 25)
        .expect("plugin should be collected");

    assert_eq!(plugin.tags, &["macro-test", "count"]);
    assert_eq!(plugin.solver.parts(), 1);
}

#[test]
fn test_untagged_plugin_has_no_tags() {
    let plugin = aoc_solver::inventory::iter::<SolverPlugin>()
        .find(|p| p.year == 2015 && p.day == 24)
        .expect("plugin should be collected");

    assert!(plugin.tags.is_empty());
}

#[test]
fn test_tag_filtered_registration() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2015, 25));
    assert!(!registry.storage().contains(2015, 24));

    let mut solver = registry.create_solver(2015, 25, "a\nb\nc").unwrap();
    let result = solver.solve(1).unwrap();
    assert_eq!(result.answer, "3");
    assert_eq!(result.label, "Lines");
}
