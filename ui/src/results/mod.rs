mod summary;
pub use summary::ResultsOverview;

mod charts;
pub use charts::{ChartBars, ResultsCharts};

mod switcher;
pub use switcher::ViewSwitcher;

mod clusters;
pub use clusters::ClusterList;

mod coverage;
pub use coverage::CoverageSet;

mod utils;
pub(crate) use utils::*;
