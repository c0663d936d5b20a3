// Widget implementations

mod section;
mod view;

pub use section::{
    section, CollapsibleSection, DroppedItem, LeadingControl, SectionConfig, SectionLayout,
};
pub use view::{
    BodyView, CollapsedOverlay, DropTargetView, HeaderView, HoverLayerView, ItemsView,
    LeadingView, SectionView,
};
