use crate::LaunchOutcome;

/// **VALUE**: Pins which outcomes count as a confirmed-healthy backend.
///
/// **BUG THIS CATCHES**: Would catch `TimedOut` or `LaunchInProgress` being reported as
/// healthy, which would make the CLI exit 0 while nothing is listening.
#[test]
fn given_each_outcome_when_is_healthy_called_then_only_confirmed_outcomes_are_healthy() {
    // GIVEN: Every outcome paired with its expected health
    let cases = [
        (LaunchOutcome::AlreadyStarted, true),
        (LaunchOutcome::AlreadyRunning, true),
        (LaunchOutcome::Launched, true),
        (LaunchOutcome::Unmanaged, false),
        (LaunchOutcome::LaunchInProgress, false),
        (LaunchOutcome::TimedOut, false),
        (LaunchOutcome::LaunchFailed, false),
    ];

    // WHEN / THEN
    for (outcome, healthy) in cases {
        assert_eq!(outcome.is_healthy(), healthy, "{outcome}");
    }
}
