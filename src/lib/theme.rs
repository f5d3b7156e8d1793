//! Shared Tailwind class constants to keep the auth screens visually consistent.

pub struct Theme;

impl Theme {
    /// Label above a form control.
    pub const LABEL: &'static str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

    /// Text input in its normal state.
    pub const INPUT: &'static str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";

    /// Text input flagged by a validation message.
    pub const INPUT_INVALID: &'static str = "bg-red-50 border border-red-500 text-red-900 placeholder-red-700 text-sm rounded-lg focus:ring-red-500 focus:border-red-500 block w-full p-2.5 dark:bg-gray-700 dark:text-red-400 dark:placeholder-red-500 dark:border-red-500";

    /// Field-level validation message rendered below a control.
    pub const FIELD_ERROR: &'static str = "mt-2 text-sm text-red-600 dark:text-red-500";

    /// Inline text link.
    pub const LINK: &'static str = "font-medium text-blue-600 hover:underline dark:text-blue-500";

    /// Header navigation link.
    pub const NAV_LINK: &'static str = "block py-2 px-3 text-gray-900 rounded hover:bg-gray-100 md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0 dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700 dark:hover:text-white md:dark:hover:bg-transparent";

    /// Secondary outlined button.
    pub const BUTTON_SECONDARY: &'static str = "inline-flex justify-center items-center px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 hover:text-blue-700 dark:bg-gray-800 dark:text-gray-400 dark:border-gray-600 dark:hover:text-white dark:hover:bg-gray-700 transition-all";
}
