//! Page chrome shared by every signed-in route.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::components::pro_modal::ProModal;
use crate::components::sidebar::Sidebar;

#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    view! {
        <div class="layout">
            <Navbar/>
            <ProModal/>
            <div class="layout__body">
                <aside class="layout__sidebar">
                    <Sidebar/>
                </aside>
                <main class="layout__main">{children()}</main>
            </div>
        </div>
    }
}
