mod event_router_tests;
