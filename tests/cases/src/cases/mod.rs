pub mod bootstrap;
pub mod no_quorum;
pub mod random_strategy;

#[cfg(test)]
mod tests {
    use crate::steps::init_test_logger;

    #[test]
    fn smoke() {
        init_test_logger();
        super::smoke::run();
    }

    #[test]
    fn bootstrap() {
        init_test_logger();
        super::bootstrap::run();
    }

    #[test]
    fn heuristic() {
        init_test_logger();
        super::heuristic::run();
    }

    #[test]
    fn random_weight() {
        init_test_logger();
        super::random_weight::run();
    }

    #[test]
    fn random_strategy() {
        init_test_logger();
        super::random_strategy::run();
    }

    #[test]
    fn repeated_rounds() {
        init_test_logger();
        super::repeated_rounds::run();
    }

    #[test]
    fn no_quorum() {
        init_test_logger();
        super::no_quorum::run();
    }

    #[test]
    fn barrier_timeout() {
        init_test_logger();
        super::barrier_timeout::run();
    }

    #[test]
    fn session_loss() {
        init_test_logger();
        super::session_loss::run();
    }
}
