/// Button actions on a result card, carried in `data-action`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PrevPage,
    NextPage,
    Download,
    CopySummary,
    CopyFields,
    Edit,
    Save,
    Cancel,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::PrevPage => "prev-page",
            Action::NextPage => "next-page",
            Action::Download => "download",
            Action::CopySummary => "copy-summary",
            Action::CopyFields => "copy-fields",
            Action::Edit => "edit",
            Action::Save => "save",
            Action::Cancel => "cancel",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "prev-page" => Some(Action::PrevPage),
            "next-page" => Some(Action::NextPage),
            "download" => Some(Action::Download),
            "copy-summary" => Some(Action::CopySummary),
            "copy-fields" => Some(Action::CopyFields),
            "edit" => Some(Action::Edit),
            "save" => Some(Action::Save),
            "cancel" => Some(Action::Cancel),
            _ => None,
        }
    }
}
