//! Markup and inline styles injected at runtime.

pub const ANIMATION_STYLES_ID: &'static str = "feed-animation-styles";
pub const SEARCH_STYLES_ID: &'static str = "search-styles";

pub const ANIMATION_STYLES: &'static str = "
    @keyframes floatUp {
        0% {
            transform: translateY(0) scale(1);
            opacity: 1;
        }
        100% {
            transform: translateY(-50px) scale(0.5);
            opacity: 0;
        }
    }

    .loading-indicator {
        display: flex;
        align-items: center;
        justify-content: center;
        gap: 12px;
    }

    .notification {
        border: 1px solid var(--border-color);
    }
";

pub const SEARCH_STYLES: &'static str = "
    .search-results {
        position: absolute;
        top: 100%;
        left: 0;
        right: 0;
        background: var(--secondary-color);
        border: 1px solid var(--border-color);
        border-radius: 8px;
        margin-top: 4px;
        box-shadow: var(--shadow-hover);
        z-index: 1000;
        max-height: 300px;
        overflow-y: auto;
    }

    .search-result-item {
        display: flex;
        align-items: center;
        gap: 12px;
        padding: 12px;
        cursor: pointer;
        transition: var(--transition);
    }

    .search-result-item:hover {
        background: var(--hover-color);
    }

    .search-result-item img {
        width: 32px;
        height: 32px;
        border-radius: 50%;
    }

    .search-username {
        font-weight: 600;
        font-size: 14px;
    }

    .search-fullname {
        font-size: 12px;
        color: #8e8e8e;
    }
";

pub const FLOATING_HEART_CSS: &'static str = "
    position: absolute;
    pointer-events: none;
    font-size: 20px;
    animation: floatUp 1s ease-out forwards;
    z-index: 1000;
";

pub const BIG_HEART_CSS: &'static str = "
    position: absolute;
    top: 50%;
    left: 50%;
    transform: translate(-50%, -50%);
    font-size: 80px;
    color: white;
    pointer-events: none;
    animation: heartBeat 0.8s ease-out forwards;
    z-index: 10;
";

pub const TOAST_CSS: &'static str = "
    position: fixed;
    bottom: 20px;
    left: 50%;
    transform: translateX(-50%);
    background: var(--secondary-color);
    color: var(--text-color);
    padding: 12px 24px;
    border-radius: 24px;
    box-shadow: var(--shadow-hover);
    z-index: 3000;
    animation: slideUp 0.3s ease-out;
";

pub const TOAST_EXIT_ANIMATION: &'static str = "fadeIn 0.3s ease-out reverse";

pub const FEED_LOADING_CSS: &'static str = "
    text-align: center;
    padding: 40px;
    color: var(--text-color);
";

pub const FEED_LOADING_HTML: &'static str =
    "<div class=\"loading\"></div><p>Loading more posts...</p>";

pub const UPLOAD_LOADING_HTML: &'static str = "<div class=\"loading\"></div><p>Uploading...</p>";

pub const UPLOAD_PROMPT_HTML: &'static str = "
    <i class=\"fas fa-image\"></i>
    <p>Drag photos and videos here</p>
    <button class=\"select-btn\">Select from computer</button>
";

pub const FLOATING_HEART: &'static str = "\u{2764}\u{fe0f}";
pub const BIG_HEART_HTML: &'static str = "<i class=\"fas fa-heart\"></i>";

pub const UPLOAD_HIGHLIGHT_BORDER: &'static str = "#0095f6";
pub const UPLOAD_HIGHLIGHT_BACKGROUND: &'static str = "rgba(0, 149, 246, 0.05)";
pub const THEME_TRANSITION: &'static str = "all 0.3s ease";
