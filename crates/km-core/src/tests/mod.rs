mod chat_member_status;
mod menu_graph;
mod property_tests;
