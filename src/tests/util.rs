use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

macro_rules! piece {
    ($kind:ident, $id:expr, $value:expr $(,)?) => {
        crate::node::FormulaPiece::new(
            crate::node::PieceKind::$kind,
            $value,
            crate::node::PieceKind::$kind.default_category(),
        ).with_id($id)
    };
}

macro_rules! node {
    ($kind:ident, $id:expr, $value:expr $(; $($child:expr),* $(,)?)?) => {
        crate::node::FormulaNode::new(piece!($kind, $id, $value), vec![ $($($child),*)? ])
    };
}

macro_rules! tree {
    ($root:expr) => { crate::node::FormulaTree::from($root) };
}

static TEST_SETUP: Once = Once::new();

/// Installs a tracing subscriber for the test run, honouring `RUST_LOG`.
pub fn init_test_logging() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer().with_target(true).with_filter(env_filter))
            .try_init();
    });
}

/// ```text
/// \int_{0}^{1} \frac{x}{2} \, d{x}  +  sin(y)
/// ```
pub fn complex_formula() -> crate::FormulaTree {
    tree!(node!(Empty, "root", "□";
        node!(Integral, "int", "∫";
            node!(Number, "lo", "0"),
            node!(Number, "hi", "1"),
            node!(Fraction, "frac", "frac";
                node!(Variable, "fx", "x"),
                node!(Number, "two", "2"),
            ),
            node!(Variable, "dx", "x"),
        ),
        node!(Operator, "plus", "+"),
        node!(Function, "sin", "sin";
            node!(Variable, "y", "y"),
        ),
    ))
}
