//! Button component with variants and sizes.

use leptos::prelude::*;

const BASE_CLASSES: &str = "inline-flex items-center justify-center gap-2 rounded-2xl font-medium \
                            cursor-pointer transition-colors focus-visible:outline-none \
                            focus-visible:ring-2 focus-visible:ring-primary focus-visible:ring-offset-2 \
                            disabled:pointer-events-none disabled:opacity-50";

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Navigation to the user section.
    Sky,
    /// Navigation to the admin section.
    Rose,
    /// Destructive action button.
    Destructive,
    /// Outline button.
    Outline,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-primary text-white hover:bg-primaryMuted",
            Self::Sky => "bg-sky-200 border hover:bg-sky-300",
            Self::Rose => "bg-rose-100 border hover:bg-rose-200",
            Self::Destructive => "bg-danger text-white hover:bg-red-600",
            Self::Outline => "bg-transparent border border-panelBorder text-textPrimary hover:bg-panel",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Small button.
    Sm,
    /// Medium button (default).
    #[default]
    Md,
    /// Large, padded navigation button.
    Lg,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "h-8 px-3 text-xs",
            Self::Md => "h-10 px-4 text-sm",
            Self::Lg => "p-5 text-base font-bold",
        }
    }
}

/// Full class list for a button, for markup that needs HTMX attributes the
/// [`Button`] component doesn't forward.
#[must_use]
pub fn button_classes(variant: ButtonVariant, size: ButtonSize, class: &str) -> String {
    format!(
        "{} {} {} {}",
        BASE_CLASSES,
        variant.classes(),
        size.classes(),
        class
    )
}

/// ShadCN-style button component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button variant=ButtonVariant::Primary button_type="submit">
///         "Ask"
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Md)]
    size: ButtonSize,
    /// Whether the button is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let classes = button_classes(variant, size, class);

    view! {
        <button type=button_type class=classes disabled=disabled>
            {children()}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render;

    #[test]
    fn test_disabled_submit_button() {
        let html = render(|| {
            view! {
                <Button button_type="submit" disabled=true>
                    "Asking..."
                </Button>
            }
        });

        assert!(html.contains(r#"type="submit""#));
        assert!(html.replace("disabled:", "").contains("disabled"));
        assert!(html.contains("Asking..."));
    }

    #[test]
    fn test_button_classes_compose() {
        let classes = button_classes(ButtonVariant::Sky, ButtonSize::Lg, "flex");
        assert!(classes.contains("bg-sky-200"));
        assert!(classes.contains("p-5"));
        assert!(classes.ends_with("flex"));
    }
}
